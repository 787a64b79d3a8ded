//! Permissive cross-origin policy, one per endpoint.
//!
//! Any origin is allowed. `OPTIONS` requests are answered by the layer itself
//! with `200`, an empty body and the endpoint's verb list, so they never reach
//! a handler or the store.

use axum::http::{header, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsPolicy {
    Tracks,
    Seed,
}

impl CorsPolicy {
    pub fn methods(self) -> Vec<Method> {
        match self {
            Self::Tracks => vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS],
            Self::Seed => vec![Method::POST, Method::OPTIONS],
        }
    }

    pub fn layer(self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(self.methods())
            .allow_headers([header::CONTENT_TYPE])
            .max_age(PREFLIGHT_MAX_AGE)
    }
}
