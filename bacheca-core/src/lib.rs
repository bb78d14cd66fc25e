//! bacheca-core: tipi condivisi tra client e server (modello Message, DTO HTTP, errori).
//! Niente I/O o dipendenze non compatibili con WASM.

pub mod models;
pub mod protocol;
pub mod error;
pub mod utils;

// Re-export utili per ridurre i percorsi nei crate client/server
pub use error::Error;
pub use models::Message;
pub use protocol::http::{
    CreateMessageRequest, CreateMessageResponse, DeleteMessagesResponse, Envelope, HelloResponse,
    ListMessagesResponse,
};
pub use utils::{new_message_id, now_timestamp};
