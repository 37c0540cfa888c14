//! Common test utilities

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;

use tiny_bank::{api, Ledger};

/// Fresh ledger plus the full application router wrapped around it
pub fn setup_app() -> (Arc<Ledger>, Router) {
    let ledger = Arc::new(Ledger::new());
    let app = api::build_app(Arc::clone(&ledger));
    (ledger, app)
}

/// Send one request and return status plus the body bytes
pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

/// Send one request and parse the body as JSON
#[allow(dead_code)]
pub async fn send_json(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, method, uri).await;
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}
