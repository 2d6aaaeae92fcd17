//! Inline style rules for every element the widget creates.
//!
//! Styles are returned as ordered `(property, value)` pairs so callers can
//! apply them one by one or serialize them into a `style` attribute.

use crate::panel::PanelState;
use crate::widget::{ButtonShape, Position, WidgetConfig};

pub type Declarations = Vec<(&'static str, String)>;

/// Stacking order high enough to sit above typical host-page overlays.
pub const WIDGET_Z_INDEX: &str = "2147483000";

/// Edge length of the toggle button in pixels.
pub const BUTTON_SIZE_PX: u32 = 48;

/// Corner radius for non-circular buttons and the content panel.
pub const CORNER_RADIUS: &str = "12px";

fn px(value: i32) -> String {
    format!("{value}px")
}

/// Fixed-position container anchored per `position`, offset by the margins.
pub fn container(config: &WidgetConfig) -> Declarations {
    let mx = px(config.margin_x);
    let my = px(config.margin_y);

    let mut decls: Declarations = vec![
        ("position", "fixed".into()),
        ("z-index", WIDGET_Z_INDEX.into()),
        ("display", "flex".into()),
        ("gap", "8px".into()),
    ];

    match config.position {
        Position::TopLeft => {
            decls.push(("top", my));
            decls.push(("left", mx));
        }
        Position::TopRight => {
            decls.push(("top", my));
            decls.push(("right", mx));
        }
        Position::BottomLeft => {
            decls.push(("bottom", my));
            decls.push(("left", mx));
        }
        Position::BottomRight => {
            decls.push(("bottom", my));
            decls.push(("right", mx));
        }
        Position::Left => {
            decls.push(("top", "50%".into()));
            decls.push(("left", mx));
            decls.push(("transform", "translateY(-50%)".into()));
        }
        Position::Right => {
            decls.push(("top", "50%".into()));
            decls.push(("right", mx));
            decls.push(("transform", "translateY(-50%)".into()));
        }
    }

    // The panel precedes the button in the DOM; top anchors flip the order
    // so the button stays in the corner.
    let direction = match config.position {
        Position::TopLeft | Position::TopRight => "column-reverse",
        _ => "column",
    };
    decls.push(("flex-direction", direction.into()));

    let align = match config.position {
        Position::TopLeft | Position::BottomLeft | Position::Left => "flex-start",
        _ => "flex-end",
    };
    decls.push(("align-items", align.into()));

    decls
}

/// Content panel holding the QR code and the caption.
pub fn panel(config: &WidgetConfig, state: PanelState) -> Declarations {
    vec![
        ("display", state.css_display().into()),
        ("flex-direction", "column".into()),
        ("align-items", "center".into()),
        ("padding", "10px".into()),
        ("background", config.background_color.clone()),
        ("border-radius", CORNER_RADIUS.into()),
        ("box-shadow", "0 4px 16px rgba(0, 0, 0, 0.15)".into()),
    ]
}

/// Square box the QR renderer draws into.
pub fn qr_container(config: &WidgetConfig) -> Declarations {
    let side = format!("{}px", config.size);
    vec![("width", side.clone()), ("height", side)]
}

pub fn caption(config: &WidgetConfig) -> Declarations {
    vec![
        ("margin-top", "8px".into()),
        ("font-family", "sans-serif".into()),
        ("font-size", "14px".into()),
        ("text-align", "center".into()),
        ("color", config.qr_code_color.clone()),
    ]
}

/// Toggle button: `circle` is fully rounded, every other shape gets the
/// standard corner radius.
pub fn button(config: &WidgetConfig) -> Declarations {
    let radius = match config.button_shape {
        ButtonShape::Circle => "50%",
        ButtonShape::Rounded | ButtonShape::Square => CORNER_RADIUS,
    };
    let side = format!("{BUTTON_SIZE_PX}px");

    vec![
        ("background", config.button_color.clone()),
        ("color", "#ffffff".into()),
        ("border", "none".into()),
        ("border-radius", radius.into()),
        ("min-width", side.clone()),
        ("height", side),
        ("padding", "0 12px".into()),
        ("display", "flex".into()),
        ("align-items", "center".into()),
        ("justify-content", "center".into()),
        ("cursor", "pointer".into()),
        ("font-family", "sans-serif".into()),
        ("font-size", "14px".into()),
    ]
}

/// Fixed error banner shown when the configuration cannot be loaded.
pub fn error_banner() -> Declarations {
    vec![
        ("position", "fixed".into()),
        ("bottom", "20px".into()),
        ("right", "20px".into()),
        ("z-index", WIDGET_Z_INDEX.into()),
        ("padding", "8px 12px".into()),
        ("background", "#fee2e2".into()),
        ("color", "#991b1b".into()),
        ("border-radius", "8px".into()),
        ("font-family", "sans-serif".into()),
        ("font-size", "12px".into()),
    ]
}

/// Serialize declarations into a `style` attribute value.
pub fn to_css(decls: &[(&'static str, String)]) -> String {
    decls
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(decls: &'a Declarations, property: &str) -> Option<&'a str> {
        decls
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn corners_use_both_margins() {
        let config = WidgetConfig {
            position: Position::TopLeft,
            margin_x: 5,
            margin_y: 30,
            ..WidgetConfig::default()
        };
        let decls = container(&config);
        assert_eq!(value(&decls, "position"), Some("fixed"));
        assert_eq!(value(&decls, "top"), Some("30px"));
        assert_eq!(value(&decls, "left"), Some("5px"));
        assert_eq!(value(&decls, "bottom"), None);
        assert_eq!(value(&decls, "flex-direction"), Some("column-reverse"));
    }

    #[test]
    fn default_anchor_is_bottom_right() {
        let decls = container(&WidgetConfig::default());
        assert_eq!(value(&decls, "bottom"), Some("20px"));
        assert_eq!(value(&decls, "right"), Some("20px"));
        assert_eq!(value(&decls, "align-items"), Some("flex-end"));
    }

    #[test]
    fn edges_center_vertically() {
        let config = WidgetConfig {
            position: Position::Right,
            margin_x: 12,
            ..WidgetConfig::default()
        };
        let decls = container(&config);
        assert_eq!(value(&decls, "top"), Some("50%"));
        assert_eq!(value(&decls, "right"), Some("12px"));
        assert_eq!(value(&decls, "transform"), Some("translateY(-50%)"));
    }

    #[test]
    fn button_radius_by_shape() {
        let mut config = WidgetConfig {
            button_shape: ButtonShape::Circle,
            button_color: "#ff0000".into(),
            ..WidgetConfig::default()
        };
        let decls = button(&config);
        assert_eq!(value(&decls, "border-radius"), Some("50%"));
        assert_eq!(value(&decls, "background"), Some("#ff0000"));

        config.button_shape = ButtonShape::Square;
        assert_eq!(value(&button(&config), "border-radius"), Some("12px"));
        config.button_shape = ButtonShape::Rounded;
        assert_eq!(value(&button(&config), "border-radius"), Some("12px"));
    }

    #[test]
    fn panel_display_follows_state() {
        let config = WidgetConfig::default();
        assert_eq!(value(&panel(&config, PanelState::Collapsed), "display"), Some("none"));
        assert_eq!(value(&panel(&config, PanelState::Expanded), "display"), Some("flex"));
    }

    #[test]
    fn css_serialization() {
        let decls: Declarations = vec![("width", "10px".into()), ("height", "12px".into())];
        assert_eq!(to_css(&decls), "width: 10px; height: 12px;");
    }
}
