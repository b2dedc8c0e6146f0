use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{response::MessageBody, state::AppState};

pub mod doc;
pub mod health;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/users", users::router())
}

/// Routes, docs and fallback with state bound. Transport layers (tracing,
/// request ids, limits) are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageBody::new(format!("Ruta no encontrada: {}", uri.path()))),
    )
}
