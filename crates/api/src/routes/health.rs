use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::routes::static_assets::{default_logo_file, ICONS_DIR};
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every check passes, otherwise `degraded`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether `STATIC_DIR` holds the default logo and the icon directory
    /// that embeds fetch.
    pub static_assets_ready: bool,
}

/// GET /health -- database reachability and static asset readiness.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = floatqr_db::health_check(&state.pool).await.is_ok();

    let static_dir = &state.config.static_dir;
    let logo = tokio::fs::try_exists(default_logo_file(static_dir)).await;
    let icons = tokio::fs::try_exists(static_dir.join(ICONS_DIR)).await;
    let static_assets_ready = matches!((logo, icons), (Ok(true), Ok(true)));
    if !static_assets_ready {
        tracing::warn!(static_dir = %static_dir.display(), "Static widget assets missing");
    }

    let status = if db_healthy && static_assets_ready {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        static_assets_ready,
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
