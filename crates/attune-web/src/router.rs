//! Axum router — maps URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{respond::qualtrics_response, system::health};
use crate::state::{AppState, SharedState};

/// Build and return the full axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/qualtrics-response", post(qualtrics_response))
        .route("/health", get(health))
        // Qualtrics posts from the browser, so CORS stays permissive.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
