//! Handlers for the `/widgets` management resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use floatqr_core::types::WidgetId;
use floatqr_db::models::widget::{CreateWidget, UpdateWidget, Widget};
use floatqr_db::repositories::WidgetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::admin_key::RequireAdminKey;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/widgets
pub async fn create(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Json(input): Json<CreateWidget>,
) -> AppResult<(StatusCode, Json<DataResponse<Widget>>)> {
    input.check()?;
    let widget = WidgetRepo::create(&state.pool, &input).await?;
    tracing::info!(widget_id = %widget.id, name = %widget.name, "Widget created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: widget })))
}

/// GET /api/v1/widgets
pub async fn list(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Widget>>>> {
    let widgets = WidgetRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: widgets }))
}

/// GET /api/v1/widgets/{id}
pub async fn get_by_id(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<WidgetId>,
) -> AppResult<Json<DataResponse<Widget>>> {
    let widget = WidgetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::widget_not_found(id.to_string()))?;
    Ok(Json(DataResponse { data: widget }))
}

/// PUT /api/v1/widgets/{id}
///
/// Partial update; the URL rule is checked against the merged record.
pub async fn update(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<WidgetId>,
    Json(input): Json<UpdateWidget>,
) -> AppResult<Json<DataResponse<Widget>>> {
    let existing = WidgetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::widget_not_found(id.to_string()))?;
    input.check(&existing)?;

    let widget = WidgetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::widget_not_found(id.to_string()))?;
    tracing::info!(widget_id = %id, "Widget updated");
    Ok(Json(DataResponse { data: widget }))
}

/// DELETE /api/v1/widgets/{id}
pub async fn delete(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(id): Path<WidgetId>,
) -> AppResult<StatusCode> {
    if WidgetRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(widget_id = %id, "Widget deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::widget_not_found(id.to_string()))
    }
}
