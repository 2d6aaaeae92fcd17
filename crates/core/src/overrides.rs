//! Per-embed overrides read from the widget's own `<script>` tag.
//!
//! Any attribute present on the tag wins over the server value for the same
//! concern. Attributes that fail to parse are reported and ignored so a typo
//! on the host page never blocks rendering.

use crate::widget::{ButtonIcon, ButtonShape, Position, WidgetConfig};

pub const ATTR_QR_ID: &str = "data-qr-id";
pub const ATTR_POSITION: &str = "data-position";
pub const ATTR_BUTTON_SHAPE: &str = "data-button-shape";
pub const ATTR_DISPLAY_TEXT: &str = "data-display-text";
pub const ATTR_BUTTON_ICON: &str = "data-button-icon";
pub const ATTR_SHOW_BUTTON: &str = "data-show-button";

/// Overrides extracted from the script tag. `None` defers to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOverrides {
    pub position: Option<Position>,
    pub button_shape: Option<ButtonShape>,
    pub display_text: Option<String>,
    pub button_icon: Option<ButtonIcon>,
    pub show_button: Option<bool>,
}

/// An attribute value that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAttribute {
    pub attribute: &'static str,
    pub value: String,
}

impl TagOverrides {
    /// Build overrides from an attribute lookup.
    ///
    /// Returns the parsed overrides plus every attribute that was present but
    /// unparseable.
    pub fn from_attributes<'a, F>(get: F) -> (Self, Vec<RejectedAttribute>)
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut rejected = Vec::new();

        let position = get(ATTR_POSITION).and_then(|v| match v.parse() {
            Ok(p) => Some(p),
            Err(_) => {
                rejected.push(RejectedAttribute {
                    attribute: ATTR_POSITION,
                    value: v.to_string(),
                });
                None
            }
        });

        let button_shape = get(ATTR_BUTTON_SHAPE).and_then(|v| match v.parse() {
            Ok(s) => Some(s),
            Err(_) => {
                rejected.push(RejectedAttribute {
                    attribute: ATTR_BUTTON_SHAPE,
                    value: v.to_string(),
                });
                None
            }
        });

        let overrides = TagOverrides {
            position,
            button_shape,
            display_text: get(ATTR_DISPLAY_TEXT).map(str::to_string),
            button_icon: get(ATTR_BUTTON_ICON).map(ButtonIcon::from),
            show_button: parse_show_button(get(ATTR_SHOW_BUTTON)),
        };

        (overrides, rejected)
    }

    /// Apply the overrides on top of a server-supplied configuration.
    pub fn apply(&self, mut config: WidgetConfig) -> WidgetConfig {
        if let Some(position) = self.position {
            config.position = position;
        }
        if let Some(shape) = self.button_shape {
            config.button_shape = shape;
        }
        if let Some(text) = &self.display_text {
            config.display_text = text.clone();
        }
        if let Some(icon) = &self.button_icon {
            config.button_icon = icon.clone();
        }
        if let Some(show) = self.show_button {
            config.show_button = show;
        }
        config
    }
}

/// Tri-state coercion of `data-show-button`: absent defers to the server,
/// the literal `"false"` disables the button, anything else enables it.
pub fn parse_show_button(value: Option<&str>) -> Option<bool> {
    value.map(|v| v != "false")
}
