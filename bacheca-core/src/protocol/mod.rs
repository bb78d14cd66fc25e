pub mod http;

// Re-export comodi
pub use http::{
    CreateMessageRequest, CreateMessageResponse, DeleteMessagesResponse, Envelope, HelloResponse,
    ListMessagesResponse,
};
