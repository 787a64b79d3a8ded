// Shared helpers for handler tests
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
};
use beatshelf_db::AppState;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceExt;

pub fn state_with(db: DatabaseConnection) -> Arc<AppState> {
    Arc::new(AppState { db })
}

/// Run one request through the full application router.
pub async fn send(
    state: Arc<AppState>,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    crate::app(state).oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
