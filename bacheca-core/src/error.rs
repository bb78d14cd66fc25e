use serde::{Deserialize, Serialize};

/// Codice per payload di richiesta malformati.
pub const VALIDATION_ERROR: &str = "validation_error";
/// Codice per qualsiasi fallimento del livello di persistenza.
pub const STORE_ERROR: &str = "store_error";

/// Errore restituito in banda nel corpo `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// Codice macchina (`validation_error`, `store_error`)
    pub code: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(VALIDATION_ERROR, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(STORE_ERROR, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}
