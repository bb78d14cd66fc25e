use serde::{Deserialize, Serialize};

use crate::{error::Error, models::Message};
/*
    dto per le richieste http del servizio messaggi.
    Ogni risposta usa l'envelope { data } oppure { error }: gli errori
    viaggiano in banda, non nello status HTTP.
*/

/// Corpo di POST /messages. `message` è obbligatorio e deve essere una stringa
/// (anche vuota).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub message: String,
}

/// Envelope comune a tutte le rotte /messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Data { data: T },
    Error { error: Error },
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope::Data { data }
    }

    pub fn error(error: Error) -> Self {
        Envelope::Error { error }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error { .. })
    }

    /// Converte l'envelope in un `Result`, comodo lato client.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Envelope::Data { data } => Ok(data),
            Envelope::Error { error } => Err(error),
        }
    }
}

// GET /messages
pub type ListMessagesResponse = Envelope<Vec<Message>>;
// POST /messages, sempre un solo elemento per simmetria con la lista
pub type CreateMessageResponse = Envelope<Vec<Message>>;
// DELETE /messages, sempre { data: [] }
pub type DeleteMessagesResponse = Envelope<Vec<Message>>;

/// Risposta di GET /, sonda di vita e identità dell'istanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloResponse {
    pub message: String,
    pub hostname: String,
}

impl HelloResponse {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            message: "Hello World".to_string(),
            hostname: hostname.into(),
        }
    }
}
