use serde::{Deserialize, Serialize};

/// Messaggio della bacheca come viaggia sul wire.
///
/// Internamente il testo si chiama `text`, sul wire il campo è `message`.
/// `id` e `createdAt` mancano solo nelle voci ottimistiche del client,
/// che non hanno ancora ricevuto un id dal server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "message")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>, // RFC3339 UTC
}

impl Message {
    /// Messaggio già persistito: id e timestamp assegnati dallo store.
    pub fn stored(id: impl Into<String>, text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            created_at: Some(created_at.into()),
        }
    }

    /// Voce locale senza id, usata per gli aggiornamenti ottimistici.
    pub fn draft(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            created_at: None,
        }
    }
}
