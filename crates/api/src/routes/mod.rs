pub mod health;
pub mod static_assets;
pub mod widget;
pub mod widgets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree (management API, bearer key required).
///
/// ```text
/// /widgets                 list, create
/// /widgets/{id}            get, update, soft delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/widgets", widgets::router())
}
