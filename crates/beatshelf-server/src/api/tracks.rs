use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use beatshelf_db::entities::track;
use beatshelf_db::AppState;

/// Served in place of a missing cover.
pub const DEFAULT_COVER_URL: &str =
    "https://images.unsplash.com/photo-1470225620780-dba8ba36b745?w=400";

pub const LIST_LIMIT: u64 = 100;

const DEFAULT_DURATION: &str = "0:00";

/// Genre value meaning "no genre filter".
const ALL_GENRES: &str = "all";

// ─── DTOs ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub genre: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub id: i32,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration: String,
    pub audio_url: String,
    pub cover_url: String,
    pub plays: i32,
    pub likes: i32,
    pub uploaded_at: Option<String>,
}

impl From<track::Model> for TrackResponse {
    fn from(t: track::Model) -> Self {
        Self {
            id: t.id,
            title: t.title,
            artist: t.artist,
            genre: t.genre,
            duration: t.duration,
            audio_url: t.audio_url,
            cover_url: t
                .cover_url
                .unwrap_or_else(|| DEFAULT_COVER_URL.to_string()),
            plays: t.plays,
            likes: t.likes,
            uploaded_at: t
                .uploaded_at
                .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrackListResponse {
    pub tracks: Vec<TrackResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTrackRequest {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub audio_url: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTrackResponse {
    pub track: TrackResponse,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ─── Listing ────────────────────────────────────────────────────────

/// Normalized list filters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackFilter {
    /// Exact genre to match.
    pub genre: Option<String>,
    /// Lower-cased substring matched against title or artist.
    pub search: Option<String>,
}

impl From<ListParams> for TrackFilter {
    fn from(params: ListParams) -> Self {
        let genre = params
            .genre
            .filter(|g| !g.trim().is_empty() && g != ALL_GENRES);
        let search = params
            .search
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase());
        Self { genre, search }
    }
}

impl TrackFilter {
    /// Newest first, capped at [`LIST_LIMIT`]. Every request value is bound
    /// as a parameter.
    pub fn into_query(self) -> Select<track::Entity> {
        let mut query = track::Entity::find();

        if let Some(genre) = self.genre {
            query = query.filter(track::Column::Genre.eq(genre));
        }

        if let Some(search) = self.search {
            let pattern = like_pattern(&search);
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(track::Column::Title)))
                            .like(pattern.clone()),
                    )
                    .add(Expr::expr(Func::lower(Expr::col(track::Column::Artist))).like(pattern)),
            );
        }

        query
            .order_by_desc(track::Column::UploadedAt)
            .limit(LIST_LIMIT)
    }
}

/// `%needle%` with LIKE wildcards escaped so the needle matches literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

// ─── Creation ───────────────────────────────────────────────────────

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration: String,
    pub audio_url: String,
    pub cover_url: Option<String>,
}

impl TryFrom<CreateTrackRequest> for NewTrack {
    type Error = ApiError;

    fn try_from(req: CreateTrackRequest) -> Result<Self, Self::Error> {
        let title = trimmed(req.title);
        let artist = trimmed(req.artist);
        let genre = trimmed(req.genre);
        let audio_url = trimmed(req.audio_url);

        match (title, artist, genre, audio_url) {
            (Some(title), Some(artist), Some(genre), Some(audio_url)) => Ok(Self {
                title,
                artist,
                genre,
                duration: trimmed(req.duration)
                    .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
                audio_url,
                cover_url: trimmed(req.cover_url),
            }),
            _ => Err(ApiError::validation("Please fill in all required fields")),
        }
    }
}

impl NewTrack {
    pub fn into_active_model(self) -> track::ActiveModel {
        track::ActiveModel {
            title: Set(self.title),
            artist: Set(self.artist),
            genre: Set(self.genre),
            duration: Set(self.duration),
            audio_url: Set(self.audio_url),
            cover_url: Set(self.cover_url),
            ..Default::default()
        }
    }
}

/// Trimmed value, or `None` when absent or blank.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_create_body(body: &[u8]) -> Result<CreateTrackRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateTrackRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Invalid request body: {e}")))
}

fn parse_track_id(raw: Option<&str>) -> Result<i64, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Track ID is required"))?;
    raw.parse()
        .map_err(|_| ApiError::validation("Track ID must be an integer"))
}

// ─── Handlers ───────────────────────────────────────────────────────

/// GET /api/tracks?genre=..&search=..
pub async fn list_tracks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<TrackListResponse>, ApiError> {
    let filter = TrackFilter::from(params);
    tracing::debug!(?filter, "listing tracks");

    let tracks = filter
        .into_query()
        .all(&state.db)
        .await?
        .into_iter()
        .map(TrackResponse::from)
        .collect();

    Ok(Json(TrackListResponse { tracks }))
}

/// POST /api/tracks
pub async fn create_track(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateTrackResponse>), ApiError> {
    let new_track = NewTrack::try_from(parse_create_body(&body)?)?;

    let created = new_track.into_active_model().insert(&state.db).await?;
    tracing::info!(id = created.id, title = %created.title, "track created");

    Ok((
        StatusCode::CREATED,
        Json(CreateTrackResponse {
            track: TrackResponse::from(created),
            message: "Track uploaded successfully",
        }),
    ))
}

/// DELETE /api/tracks?id=..
///
/// Deleting an unknown id is not an error.
pub async fn delete_track(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_track_id(params.id.as_deref())?;

    // Ids outside the column's range cannot match any row.
    let rows_affected = match i32::try_from(id) {
        Ok(id) => track::Entity::delete_by_id(id).exec(&state.db).await?.rows_affected,
        Err(_) => 0,
    };
    tracing::info!(id, rows_affected, "track deleted");

    Ok(Json(MessageResponse {
        message: "Track deleted",
    }))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed")
}
