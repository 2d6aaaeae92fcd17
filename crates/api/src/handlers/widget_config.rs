//! Handlers for the public widget document and server-side QR rendering.

use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use floatqr_core::qr::{render_svg, QrOptions};
use floatqr_core::types::WidgetId;
use floatqr_core::widget::WidgetConfig;
use floatqr_db::repositories::WidgetRepo;
use floatqr_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load the configuration an embed may see.
///
/// Malformed, unknown, inactive and deleted ids are all the same 404 so the
/// public endpoint does not reveal which records exist.
pub async fn load_servable_config(pool: &DbPool, raw_id: &str) -> AppResult<WidgetConfig> {
    let id: WidgetId = raw_id
        .parse()
        .map_err(|_| AppError::widget_not_found(raw_id))?;
    let widget = WidgetRepo::find_servable(pool, id)
        .await?
        .ok_or_else(|| AppError::widget_not_found(raw_id))?;
    Ok(widget.to_config()?)
}

/// GET /api/widget/{id}
pub async fn get_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let config = load_servable_config(&state.pool, &id).await?;
    let cache = format!("public, max-age={}", state.config.widget_cache_secs);
    Ok(([(CACHE_CONTROL, cache)], Json(config)))
}

#[derive(Debug, Deserialize)]
pub struct QrSvgParams {
    /// Page URL to encode for current-URL widgets. Ignored otherwise.
    pub data: Option<String>,
}

/// GET /api/widget/{id}/qr.svg
pub async fn qr_svg(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<QrSvgParams>,
) -> AppResult<impl IntoResponse> {
    let config = load_servable_config(&state.pool, &id).await?;

    let page = params.data.unwrap_or_default();
    let data = config
        .qr_data(page.trim())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(
                "No QR data: pass `data` for widgets that encode the current page".into(),
            )
        })?;

    // A relative logo path resolves against this service when the SVG is
    // loaded from it.
    let options = QrOptions::for_widget(&config, data, "");
    let svg = render_svg(&options).map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok((
        [(CONTENT_TYPE, "image/svg+xml"), (CACHE_CONTROL, "no-store")],
        svg,
    ))
}
