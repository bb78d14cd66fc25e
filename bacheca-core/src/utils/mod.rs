pub mod ids;
pub mod time;

pub use self::ids::new_message_id;
pub use self::time::now_timestamp;
