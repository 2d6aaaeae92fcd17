//! Repository for the `widgets` table.

use floatqr_core::types::WidgetId;
use floatqr_core::widget::ButtonIcon;
use sqlx::PgPool;

use crate::models::widget::{CreateWidget, UpdateWidget, Widget};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, url_type, custom_url, position, margin_x, margin_y, size, \
    qr_code_color, background_color, button_color, button_shape, button_icon, display_text, \
    show_on_desktop, show_on_mobile, show_button, start_collapsed, auto_show_on_scroll, \
    logo_url, is_active, created_at, updated_at";

/// Provides CRUD operations for widget configurations.
pub struct WidgetRepo;

fn normalize_icon(icon: &Option<String>) -> Option<String> {
    icon.as_deref().map(|i| String::from(ButtonIcon::from(i)))
}

impl WidgetRepo {
    /// Insert a new widget, returning the created row.
    ///
    /// Omitted optional fields fall back to the documented widget defaults.
    pub async fn create(pool: &PgPool, input: &CreateWidget) -> Result<Widget, sqlx::Error> {
        let query = format!(
            "INSERT INTO widgets (
                name, url_type, custom_url, position, margin_x, margin_y, size,
                qr_code_color, background_color, button_color, button_shape, button_icon,
                display_text, show_on_desktop, show_on_mobile, show_button, start_collapsed,
                auto_show_on_scroll, logo_url
             ) VALUES (
                $1, $2, $3, COALESCE($4, 'bottom-right'), COALESCE($5, 20), COALESCE($6, 20),
                COALESCE($7, 150), COALESCE($8, '#000000'), COALESCE($9, '#ffffff'),
                COALESCE($10, '#000000'), COALESCE($11, 'rounded'), COALESCE($12, 'none'),
                COALESCE($13, 'Scan me'), COALESCE($14, TRUE), COALESCE($15, TRUE),
                COALESCE($16, TRUE), COALESCE($17, FALSE), COALESCE($18, FALSE), $19
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(&input.name)
            .bind(input.url_type.as_str())
            .bind(&input.custom_url)
            .bind(input.position.map(|p| p.as_str()))
            .bind(input.margin_x)
            .bind(input.margin_y)
            .bind(input.size)
            .bind(&input.qr_code_color)
            .bind(&input.background_color)
            .bind(&input.button_color)
            .bind(input.button_shape.map(|s| s.as_str()))
            .bind(normalize_icon(&input.button_icon))
            .bind(&input.display_text)
            .bind(input.show_on_desktop)
            .bind(input.show_on_mobile)
            .bind(input.show_button)
            .bind(input.start_collapsed)
            .bind(input.auto_show_on_scroll)
            .bind(&input.logo_url)
            .fetch_one(pool)
            .await
    }

    /// Find a widget by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: WidgetId) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM widgets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a widget that may be served to embeds: active and not deleted.
    pub async fn find_servable(
        pool: &PgPool,
        id: WidgetId,
    ) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM widgets
             WHERE id = $1 AND is_active AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List widgets ordered by most recently created first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Widget>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM widgets WHERE deleted_at IS NULL
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a widget. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: WidgetId,
        input: &UpdateWidget,
    ) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!(
            "UPDATE widgets SET
                name = COALESCE($2, name),
                url_type = COALESCE($3, url_type),
                custom_url = COALESCE($4, custom_url),
                position = COALESCE($5, position),
                margin_x = COALESCE($6, margin_x),
                margin_y = COALESCE($7, margin_y),
                size = COALESCE($8, size),
                qr_code_color = COALESCE($9, qr_code_color),
                background_color = COALESCE($10, background_color),
                button_color = COALESCE($11, button_color),
                button_shape = COALESCE($12, button_shape),
                button_icon = COALESCE($13, button_icon),
                display_text = COALESCE($14, display_text),
                show_on_desktop = COALESCE($15, show_on_desktop),
                show_on_mobile = COALESCE($16, show_on_mobile),
                show_button = COALESCE($17, show_button),
                start_collapsed = COALESCE($18, start_collapsed),
                auto_show_on_scroll = COALESCE($19, auto_show_on_scroll),
                logo_url = COALESCE($20, logo_url),
                is_active = COALESCE($21, is_active)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.url_type.map(|t| t.as_str()))
            .bind(&input.custom_url)
            .bind(input.position.map(|p| p.as_str()))
            .bind(input.margin_x)
            .bind(input.margin_y)
            .bind(input.size)
            .bind(&input.qr_code_color)
            .bind(&input.background_color)
            .bind(&input.button_color)
            .bind(input.button_shape.map(|s| s.as_str()))
            .bind(normalize_icon(&input.button_icon))
            .bind(&input.display_text)
            .bind(input.show_on_desktop)
            .bind(input.show_on_mobile)
            .bind(input.show_button)
            .bind(input.start_collapsed)
            .bind(input.auto_show_on_scroll)
            .bind(&input.logo_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a widget by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: WidgetId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE widgets SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
