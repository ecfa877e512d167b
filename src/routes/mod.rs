//! Rutas del servidor mock

pub mod collection_routes;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::api::collections::health;
use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Router completo del servidor mock
pub fn create_app(state: AppState) -> Router {
    let cors = cors_for(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .merge(collection_routes::create_collection_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
