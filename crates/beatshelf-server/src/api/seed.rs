//! Catalog reset endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use beatshelf_db::seed;
use beatshelf_db::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: u64,
}

/// POST /api/seed-tracks — replace every track with the sample catalog
pub async fn seed_tracks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeedResponse>, ApiError> {
    let count = seed::reseed(&state.db).await?;

    Ok(Json(SeedResponse {
        message: format!("Successfully added {count} tracks"),
        count,
    }))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Only POST method allowed")
}
