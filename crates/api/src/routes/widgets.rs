//! Route definitions for the `/widgets` management resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::widgets;
use crate::state::AppState;

/// Routes mounted at `/api/v1/widgets`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(widgets::list).post(widgets::create))
        .route(
            "/{id}",
            get(widgets::get_by_id)
                .put(widgets::update)
                .delete(widgets::delete),
        )
}
