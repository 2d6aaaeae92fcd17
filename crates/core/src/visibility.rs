//! Device-based visibility gate.
//!
//! Evaluated once, synchronously, after the configuration arrives. Resizing
//! the viewport afterwards never re-runs it.

use crate::widget::WidgetConfig;

/// Viewports at least this wide are treated as desktop.
pub const DESKTOP_MIN_WIDTH: u32 = 768;

/// Device class derived from the viewport width at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn from_viewport_width(width: u32) -> Self {
        if width >= DESKTOP_MIN_WIDTH {
            DeviceClass::Desktop
        } else {
            DeviceClass::Mobile
        }
    }
}

/// Whether the widget should be rendered at all for this viewport.
///
/// `show_button` deliberately plays no part here: it only decides whether a
/// toggle exists.
pub fn should_render(config: &WidgetConfig, viewport_width: u32) -> bool {
    match DeviceClass::from_viewport_width(viewport_width) {
        DeviceClass::Desktop => config.show_on_desktop,
        DeviceClass::Mobile => config.show_on_mobile,
    }
}
