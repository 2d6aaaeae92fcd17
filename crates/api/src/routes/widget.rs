//! Route definitions for the public `/api/widget` resource read by embeds.

use axum::routing::get;
use axum::Router;

use crate::handlers::{widget_config, widget_preview};
use crate::state::AppState;

/// Routes mounted at `/api/widget`.
///
/// ```text
/// GET /{id}              -> get_config
/// GET /{id}/qr.svg       -> qr_svg
/// GET /{id}/preview      -> preview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(widget_config::get_config))
        .route("/{id}/qr.svg", get(widget_config::qr_svg))
        .route("/{id}/preview", get(widget_preview::preview))
}
