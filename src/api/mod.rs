//! API module
//!
//! HTTP endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::ledger::Ledger;

pub use routes::{create_router, AppState};

/// Build the full application: routes, middleware and shared state
pub fn build_app(ledger: Arc<Ledger>) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(create_router())
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(ledger))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
