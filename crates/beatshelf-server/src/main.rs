use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use beatshelf_db::AppState;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod api;
mod cors;
mod error;
#[cfg(test)]
mod test_support;

use cors::CorsPolicy;

const DEFAULT_PORT: u16 = 8080;

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Database connection
    let db_config = beatshelf_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = beatshelf_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    let state = Arc::new(AppState { db });

    let port = std::env::var("BEATSHELF_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(%addr, "server started");

    axum::serve(listener, app(state))
        .await
        .expect("server error");
}

/// Full application router.
pub(crate) fn app(state: Arc<AppState>) -> Router {
    let tracks = Router::new()
        .route(
            "/tracks",
            get(api::tracks::list_tracks)
                .post(api::tracks::create_track)
                .delete(api::tracks::delete_track)
                .head(api::tracks::method_not_allowed)
                .fallback(api::tracks::method_not_allowed),
        )
        .layer(CorsPolicy::Tracks.layer());

    let seed = Router::new()
        .route(
            "/seed-tracks",
            post(api::seed::seed_tracks).fallback(api::seed::method_not_allowed),
        )
        .layer(CorsPolicy::Seed.layer());

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", tracks.merge(seed))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{body_json, send, state_with};
    use axum::http::{Method, StatusCode};
    use sea_orm::DatabaseConnection;

    #[tokio::test]
    async fn test_healthz() {
        let resp = send(
            state_with(DatabaseConnection::Disconnected),
            Method::GET,
            "/healthz",
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let resp = send(
            state_with(DatabaseConnection::Disconnected),
            Method::GET,
            "/api/albums",
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
