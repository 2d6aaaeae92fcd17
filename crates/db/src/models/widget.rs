//! Widget configuration entity model and DTOs.

use floatqr_core::error::CoreError;
use floatqr_core::types::{Timestamp, WidgetId};
use floatqr_core::validation::{
    color_rule, describe_errors, http_url_rule, icon_name_rule, validate_url_source,
};
use floatqr_core::widget::{ButtonIcon, ButtonShape, Position, UrlType, WidgetConfig};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A widget row from the `widgets` table.
///
/// Enum-valued columns are stored as their wire spellings and guarded by
/// `CHECK` constraints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Widget {
    pub id: WidgetId,
    pub name: String,
    pub url_type: String,
    pub custom_url: Option<String>,
    pub position: String,
    pub margin_x: i32,
    pub margin_y: i32,
    pub size: i32,
    pub qr_code_color: String,
    pub background_color: String,
    pub button_color: String,
    pub button_shape: String,
    pub button_icon: String,
    pub display_text: String,
    pub show_on_desktop: bool,
    pub show_on_mobile: bool,
    pub show_button: bool,
    pub start_collapsed: bool,
    pub auto_show_on_scroll: bool,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Widget {
    /// Convert the row into the public configuration document.
    pub fn to_config(&self) -> Result<WidgetConfig, CoreError> {
        let corrupt = |column: &str, e: CoreError| {
            CoreError::Internal(format!("widget {} has invalid {column}: {e}", self.id))
        };

        Ok(WidgetConfig {
            id: self.id.to_string(),
            url_type: self.url_type.parse().map_err(|e| corrupt("url_type", e))?,
            custom_url: self.custom_url.clone(),
            url: None,
            position: self.position.parse().map_err(|e| corrupt("position", e))?,
            margin_x: self.margin_x,
            margin_y: self.margin_y,
            size: u32::try_from(self.size)
                .map_err(|_| CoreError::Internal(format!("widget {} has negative size", self.id)))?,
            qr_code_color: self.qr_code_color.clone(),
            background_color: self.background_color.clone(),
            button_color: self.button_color.clone(),
            button_shape: self
                .button_shape
                .parse()
                .map_err(|e| corrupt("button_shape", e))?,
            button_icon: ButtonIcon::from(self.button_icon.as_str()),
            display_text: self.display_text.clone(),
            show_on_desktop: self.show_on_desktop,
            show_on_mobile: self.show_on_mobile,
            show_button: self.show_button,
            start_collapsed: self.start_collapsed,
            auto_show_on_scroll: self.auto_show_on_scroll,
            logo_url: self.logo_url.clone(),
        })
    }
}

/// DTO for creating a widget. Omitted fields take the column defaults.
///
/// Numeric and length bounds match the constants in
/// [`floatqr_core::validation`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWidget {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub url_type: UrlType,
    #[validate(length(max = 2048), custom(function = "http_url_rule"))]
    pub custom_url: Option<String>,
    pub position: Option<Position>,
    #[validate(range(min = 0, max = 500))]
    pub margin_x: Option<i32>,
    #[validate(range(min = 0, max = 500))]
    pub margin_y: Option<i32>,
    #[validate(range(min = 50, max = 1000))]
    pub size: Option<i32>,
    #[validate(custom(function = "color_rule"))]
    pub qr_code_color: Option<String>,
    #[validate(custom(function = "color_rule"))]
    pub background_color: Option<String>,
    #[validate(custom(function = "color_rule"))]
    pub button_color: Option<String>,
    pub button_shape: Option<ButtonShape>,
    #[validate(custom(function = "icon_name_rule"))]
    pub button_icon: Option<String>,
    #[validate(length(max = 100))]
    pub display_text: Option<String>,
    pub show_on_desktop: Option<bool>,
    pub show_on_mobile: Option<bool>,
    pub show_button: Option<bool>,
    pub start_collapsed: Option<bool>,
    pub auto_show_on_scroll: Option<bool>,
    #[validate(length(max = 2048), custom(function = "http_url_rule"))]
    pub logo_url: Option<String>,
}

impl CreateWidget {
    /// Field rules plus the cross-field URL rule.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|e| describe_errors(&e))?;
        validate_url_source(self.url_type, self.custom_url.as_deref())
    }
}

/// DTO for updating an existing widget. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWidget {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub url_type: Option<UrlType>,
    #[validate(length(max = 2048), custom(function = "http_url_rule"))]
    pub custom_url: Option<String>,
    pub position: Option<Position>,
    #[validate(range(min = 0, max = 500))]
    pub margin_x: Option<i32>,
    #[validate(range(min = 0, max = 500))]
    pub margin_y: Option<i32>,
    #[validate(range(min = 50, max = 1000))]
    pub size: Option<i32>,
    #[validate(custom(function = "color_rule"))]
    pub qr_code_color: Option<String>,
    #[validate(custom(function = "color_rule"))]
    pub background_color: Option<String>,
    #[validate(custom(function = "color_rule"))]
    pub button_color: Option<String>,
    pub button_shape: Option<ButtonShape>,
    #[validate(custom(function = "icon_name_rule"))]
    pub button_icon: Option<String>,
    #[validate(length(max = 100))]
    pub display_text: Option<String>,
    pub show_on_desktop: Option<bool>,
    pub show_on_mobile: Option<bool>,
    pub show_button: Option<bool>,
    pub start_collapsed: Option<bool>,
    pub auto_show_on_scroll: Option<bool>,
    #[validate(length(max = 2048), custom(function = "http_url_rule"))]
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateWidget {
    /// Field rules plus the URL rule evaluated against the row the patch
    /// will produce.
    pub fn check(&self, existing: &Widget) -> Result<(), CoreError> {
        self.validate().map_err(|e| describe_errors(&e))?;

        let url_type = match self.url_type {
            Some(t) => t,
            None => existing.url_type.parse()?,
        };
        let custom_url = self.custom_url.as_deref().or(existing.custom_url.as_deref());
        validate_url_source(url_type, custom_url)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn row() -> Widget {
        Widget {
            id: WidgetId::nil(),
            name: "Storefront".into(),
            url_type: "custom".into(),
            custom_url: Some("https://example.com/x".into()),
            position: "top-right".into(),
            margin_x: 10,
            margin_y: 15,
            size: 180,
            qr_code_color: "#111111".into(),
            background_color: "#eeeeee".into(),
            button_color: "#ff0000".into(),
            button_shape: "circle".into(),
            button_icon: "none".into(),
            display_text: "Scan".into(),
            show_on_desktop: true,
            show_on_mobile: false,
            show_button: true,
            start_collapsed: true,
            auto_show_on_scroll: true,
            logo_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_config() {
        let config = row().to_config().unwrap();
        assert_eq!(config.id, WidgetId::nil().to_string());
        assert_eq!(config.url_type, UrlType::Custom);
        assert_eq!(config.position, Position::TopRight);
        assert_eq!(config.size, 180);
        assert_eq!(config.button_shape, ButtonShape::Circle);
        assert_eq!(config.button_icon, ButtonIcon::None);
        assert!(!config.show_on_mobile);
    }

    #[test]
    fn corrupt_enum_column_is_internal_error() {
        let mut r = row();
        r.position = "middle".into();
        assert!(matches!(r.to_config(), Err(CoreError::Internal(_))));
    }

    #[test]
    fn create_requires_custom_url_in_custom_mode() {
        let input: CreateWidget =
            serde_json::from_value(json!({ "name": "w", "url_type": "custom" })).unwrap();
        assert!(matches!(input.check(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn create_rejects_bad_fields() {
        let input: CreateWidget = serde_json::from_value(json!({
            "name": "w",
            "size": 10,
            "qr_code_color": "url(javascript:x)",
            "button_icon": "../etc/passwd",
        }))
        .unwrap();
        let err = input.check().unwrap_err().to_string();
        assert!(err.contains("size"), "{err}");
        assert!(err.contains("qr_code_color"), "{err}");
        assert!(err.contains("button_icon"), "{err}");
    }

    #[test]
    fn create_accepts_minimal_input() {
        let input: CreateWidget = serde_json::from_value(json!({ "name": "w" })).unwrap();
        assert!(input.check().is_ok());
        assert_eq!(input.url_type, UrlType::Current);
    }

    #[test]
    fn update_checks_against_existing_row() {
        let mut existing = row();
        existing.url_type = "current".into();
        existing.custom_url = None;

        let patch = UpdateWidget {
            url_type: Some(UrlType::Custom),
            ..UpdateWidget::default()
        };
        assert!(patch.check(&existing).is_err());

        let patch = UpdateWidget {
            url_type: Some(UrlType::Custom),
            custom_url: Some("https://example.com".into()),
            ..UpdateWidget::default()
        };
        assert!(patch.check(&existing).is_ok());
    }
}
