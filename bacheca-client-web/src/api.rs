use bacheca_core::{
    CreateMessageRequest, CreateMessageResponse, DeleteMessagesResponse, Envelope, ListMessagesResponse, Message,
};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// URL base del servizio, sovrascrivibile a compile time con `BACHECA_API_URL`.
pub fn api_url() -> &'static str {
    option_env!("BACHECA_API_URL").unwrap_or(DEFAULT_API_URL)
}

fn messages_url() -> String {
    format!("{}/messages", api_url().trim_end_matches('/'))
}

#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Il server ha risposto con `{ error }`.
    #[error("server error: {0}")]
    Server(bacheca_core::Error),
}

fn read_envelope<T>(envelope: Envelope<T>) -> Result<T, ApiFailure> {
    envelope.into_result().map_err(ApiFailure::Server)
}

/// GET /messages
pub async fn list_messages() -> Result<Vec<Message>, ApiFailure> {
    let envelope: ListMessagesResponse = reqwest::Client::new()
        .get(messages_url())
        .send()
        .await?
        .json()
        .await?;
    read_envelope(envelope)
}

/// POST /messages
pub async fn create_message(text: &str) -> Result<Vec<Message>, ApiFailure> {
    let body = CreateMessageRequest {
        message: text.to_string(),
    };
    let envelope: CreateMessageResponse = reqwest::Client::new()
        .post(messages_url())
        .json(&body)
        .send()
        .await?
        .json()
        .await?;
    read_envelope(envelope)
}

/// DELETE /messages
pub async fn delete_all_messages() -> Result<(), ApiFailure> {
    let envelope: DeleteMessagesResponse = reqwest::Client::new()
        .delete(messages_url())
        .send()
        .await?
        .json()
        .await?;
    read_envelope(envelope).map(|_| ())
}
