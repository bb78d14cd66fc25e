use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use bacheca_core::{
    CreateMessageRequest, CreateMessageResponse, DeleteMessagesResponse, Envelope, HelloResponse,
    ListMessagesResponse,
};
use std::sync::Arc;

use crate::{error::ApiError, health_with_store, AppState};

/// Handler per GET /
pub async fn hello(Extension(state): Extension<Arc<AppState>>) -> Json<HelloResponse> {
    Json(HelloResponse::new(state.hostname.clone()))
}

/// Handler per GET /health
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> StatusCode {
    health_with_store(state.store.as_ref()).await
}

/// Handler per GET /messages
pub async fn list_messages(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let messages = state.store.find_all().await?;
    Ok(Json(Envelope::data(messages)))
}

/// Handler per POST /messages
///
/// Il corpo deve essere JSON con `message` stringa; qualsiasi altra forma
/// diventa un `validation_error` e lo store non viene toccato.
pub async fn create_message(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Json<CreateMessageResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let message = state.store.create(&req.message).await?;
    tracing::info!(message_id = message.id.as_deref().unwrap_or_default(), "message created");

    // un solo elemento, per simmetria con la lista
    Ok(Json(Envelope::data(vec![message])))
}

/// Handler per DELETE /messages, idempotente.
pub async fn delete_all_messages(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<DeleteMessagesResponse>, ApiError> {
    state.store.delete_all().await?;
    tracing::info!("all messages deleted");
    Ok(Json(Envelope::data(Vec::new())))
}
