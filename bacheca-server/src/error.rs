use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use bacheca_core::{Envelope, Error as WireError};
use thiserror::Error;

use crate::store::StoreError;

/// Status HTTP usato per le risposte d'errore.
///
/// Gli errori sono riportati in banda nel corpo `{ error }` con 200, così come
/// il client se li aspetta. Cambiare questa costante basta per passare a 4xx/5xx.
pub const IN_BAND_ERROR_STATUS: StatusCode = StatusCode::OK;

/// Errori che un handler può restituire; nessuno esce dal confine della rotta.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn to_wire(&self) -> WireError {
        match self {
            ApiError::Validation(msg) => WireError::validation(msg.clone()),
            ApiError::Store(e) => WireError::store(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(msg) => tracing::warn!(error = %msg, "rejected request"),
            ApiError::Store(e) => tracing::error!(error = %e, "store operation failed"),
        }
        let body: Envelope<()> = Envelope::error(self.to_wire());
        (IN_BAND_ERROR_STATUS, Json(body)).into_response()
    }
}
