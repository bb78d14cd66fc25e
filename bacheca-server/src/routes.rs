use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers;
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(controllers::hello))
        .route("/health", get(controllers::health))
        .route(
            "/messages",
            get(controllers::list_messages)
                .post(controllers::create_message)
                .delete(controllers::delete_all_messages),
        )
        // qualsiasi origine: il client gira su un'altra porta
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
