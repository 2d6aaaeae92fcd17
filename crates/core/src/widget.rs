//! Widget configuration: the JSON document served by `GET /api/widget/{id}`.
//!
//! The server may omit any optional field (or send `null`); the documented
//! defaults are applied while deserializing so every consumer sees a fully
//! populated [`WidgetConfig`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// QR code edge length in pixels when the server omits `size`.
pub const DEFAULT_SIZE: u32 = 150;

/// Offset from the anchored edges when the server omits a margin.
pub const DEFAULT_MARGIN: i32 = 20;

/// Caption shown under the QR code when the server omits `display_text`.
pub const DEFAULT_DISPLAY_TEXT: &str = "Scan me";

/// Toggle button label when no icon is available and the caption is empty.
pub const BUTTON_FALLBACK_TEXT: &str = "QR";

pub const DEFAULT_QR_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_BUTTON_COLOR: &str = "#000000";

/// Site-hosted center logo used when `logo_url` is absent.
pub const DEFAULT_LOGO_PATH: &str = "/logo.png";

/// `button_icon` value meaning "no icon, render text".
pub const ICON_NONE: &str = "none";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Whether the QR code encodes the visiting page's URL or a fixed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlType {
    #[default]
    Current,
    Custom,
}

impl UrlType {
    pub fn as_str(self) -> &'static str {
        match self {
            UrlType::Current => "current",
            UrlType::Custom => "custom",
        }
    }
}

impl FromStr for UrlType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(UrlType::Current),
            "custom" => Ok(UrlType::Custom),
            other => Err(CoreError::Validation(format!("Unknown url_type '{other}'"))),
        }
    }
}

/// Screen corner or edge the widget container is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Left,
    Right,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
        Position::Left,
        Position::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown position '{s}'")))
    }
}

/// Visual shape of the toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    #[default]
    Rounded,
    Square,
    Circle,
}

impl ButtonShape {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonShape::Rounded => "rounded",
            ButtonShape::Square => "square",
            ButtonShape::Circle => "circle",
        }
    }
}

impl FromStr for ButtonShape {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rounded" => Ok(ButtonShape::Rounded),
            "square" => Ok(ButtonShape::Square),
            "circle" => Ok(ButtonShape::Circle),
            other => Err(CoreError::Validation(format!(
                "Unknown button_shape '{other}'"
            ))),
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_via_as_str!(UrlType, Position, ButtonShape);

/// Icon shown on the toggle button. Serialized as a bare string where
/// `"none"` selects the text fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ButtonIcon {
    #[default]
    None,
    Named(String),
}

impl ButtonIcon {
    /// Icon name to fetch, or `None` when text should be shown.
    pub fn name(&self) -> Option<&str> {
        match self {
            ButtonIcon::None => None,
            ButtonIcon::Named(name) => Some(name),
        }
    }
}

impl From<String> for ButtonIcon {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ICON_NONE {
            ButtonIcon::None
        } else {
            ButtonIcon::Named(trimmed.to_string())
        }
    }
}

impl From<&str> for ButtonIcon {
    fn from(value: &str) -> Self {
        ButtonIcon::from(value.to_string())
    }
}

impl From<ButtonIcon> for String {
    fn from(value: ButtonIcon) -> Self {
        match value {
            ButtonIcon::None => ICON_NONE.to_string(),
            ButtonIcon::Named(name) => name,
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetConfig
// ---------------------------------------------------------------------------

/// Fully resolved configuration for one widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireConfig")]
pub struct WidgetConfig {
    pub id: String,
    pub url_type: UrlType,
    pub custom_url: Option<String>,
    /// Legacy generic URL, only consulted when `custom_url` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub position: Position,
    pub margin_x: i32,
    pub margin_y: i32,
    pub size: u32,
    pub qr_code_color: String,
    pub background_color: String,
    pub button_color: String,
    pub button_shape: ButtonShape,
    pub button_icon: ButtonIcon,
    pub display_text: String,
    pub show_on_desktop: bool,
    pub show_on_mobile: bool,
    pub show_button: bool,
    pub start_collapsed: bool,
    pub auto_show_on_scroll: bool,
    pub logo_url: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WireConfig::default().into()
    }
}

impl WidgetConfig {
    /// Data the QR code encodes.
    ///
    /// In current-URL mode this is `current_location` (the host page's own
    /// URL at render time) even when a `custom_url` is configured. In custom
    /// mode it is `custom_url`, falling back to `url`. Returns `None` when
    /// custom mode has no usable URL.
    pub fn qr_data(&self, current_location: &str) -> Option<String> {
        match self.url_type {
            UrlType::Current => Some(current_location.to_string()),
            UrlType::Custom => non_empty(self.custom_url.as_deref())
                .or_else(|| non_empty(self.url.as_deref()))
                .map(str::to_string),
        }
    }

    /// Center image for the QR code: `logo_url`, or the site default served
    /// from `origin`.
    pub fn logo_source(&self, origin: &str) -> String {
        match non_empty(self.logo_url.as_deref()) {
            Some(url) => url.to_string(),
            None => format!("{}{DEFAULT_LOGO_PATH}", origin.trim_end_matches('/')),
        }
    }

    /// Text rendered on the toggle button when no icon is shown.
    pub fn button_text(&self) -> &str {
        non_empty(Some(&self.display_text)).unwrap_or(BUTTON_FALLBACK_TEXT)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lenient wire shape: every field optional, `null` treated as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireConfig {
    id: Option<String>,
    url_type: Option<UrlType>,
    custom_url: Option<String>,
    url: Option<String>,
    position: Option<Position>,
    margin_x: Option<i32>,
    margin_y: Option<i32>,
    size: Option<u32>,
    qr_code_color: Option<String>,
    background_color: Option<String>,
    button_color: Option<String>,
    button_shape: Option<ButtonShape>,
    button_icon: Option<ButtonIcon>,
    display_text: Option<String>,
    show_on_desktop: Option<bool>,
    show_on_mobile: Option<bool>,
    show_button: Option<bool>,
    start_collapsed: Option<bool>,
    auto_show_on_scroll: Option<bool>,
    logo_url: Option<String>,
}

impl From<WireConfig> for WidgetConfig {
    fn from(w: WireConfig) -> Self {
        let color = |value: Option<String>, default: &str| {
            value
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        WidgetConfig {
            id: w.id.unwrap_or_default(),
            url_type: w.url_type.unwrap_or_default(),
            custom_url: w.custom_url,
            url: w.url,
            position: w.position.unwrap_or_default(),
            margin_x: w.margin_x.unwrap_or(DEFAULT_MARGIN),
            margin_y: w.margin_y.unwrap_or(DEFAULT_MARGIN),
            // A zero-sized QR code cannot be drawn.
            size: w.size.filter(|s| *s > 0).unwrap_or(DEFAULT_SIZE),
            qr_code_color: color(w.qr_code_color, DEFAULT_QR_COLOR),
            background_color: color(w.background_color, DEFAULT_BACKGROUND_COLOR),
            button_color: color(w.button_color, DEFAULT_BUTTON_COLOR),
            button_shape: w.button_shape.unwrap_or_default(),
            button_icon: w.button_icon.unwrap_or_default(),
            display_text: w
                .display_text
                .unwrap_or_else(|| DEFAULT_DISPLAY_TEXT.to_string()),
            show_on_desktop: w.show_on_desktop.unwrap_or(true),
            show_on_mobile: w.show_on_mobile.unwrap_or(true),
            show_button: w.show_button.unwrap_or(true),
            start_collapsed: w.start_collapsed.unwrap_or(false),
            auto_show_on_scroll: w.auto_show_on_scroll.unwrap_or(false),
            logo_url: w.logo_url,
        }
    }
}
