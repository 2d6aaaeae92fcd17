//! Building the widget's element tree.

use floatqr_core::layout;
use floatqr_core::panel::PanelState;
use floatqr_core::widget::WidgetConfig;

use crate::dom::{Document, EventKind, NodeId};

pub const CONTAINER_ID: &str = "qr-widget-container";
pub const PANEL_ID: &str = "qr-widget-panel";
pub const QR_CODE_ID: &str = "qr-widget-code";
pub const CAPTION_ID: &str = "qr-widget-caption";
pub const TOGGLE_ID: &str = "qr-widget-toggle";

/// Handles to the elements the runtime updates after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDom {
    pub container: NodeId,
    pub panel: NodeId,
    pub qr_container: NodeId,
    pub caption: NodeId,
    pub button: Option<NodeId>,
}

/// Create the container, panel and (when enabled) toggle button, and attach
/// the container to the body.
///
/// The button starts with its text label; the icon replaces it later if it
/// loads.
pub fn build(doc: &mut Document, config: &WidgetConfig, state: PanelState) -> WidgetDom {
    let container = element(doc, "div", CONTAINER_ID);
    doc.apply_styles(container, &layout::container(config));
    doc.set_attribute(container, "data-position", config.position.as_str());

    let panel = element(doc, "div", PANEL_ID);
    doc.apply_styles(panel, &layout::panel(config, state));

    let qr_container = element(doc, "div", QR_CODE_ID);
    doc.apply_styles(qr_container, &layout::qr_container(config));

    let caption = element(doc, "div", CAPTION_ID);
    doc.apply_styles(caption, &layout::caption(config));
    doc.set_text(caption, &config.display_text);

    doc.append_child(panel, qr_container);
    doc.append_child(panel, caption);
    doc.append_child(container, panel);

    let button = config.show_button.then(|| {
        let button = element(doc, "button", TOGGLE_ID);
        doc.set_attribute(button, "type", "button");
        doc.set_attribute(button, "aria-controls", PANEL_ID);
        doc.set_attribute(button, "aria-label", config.button_text());
        doc.set_attribute(button, "aria-expanded", aria_expanded(state));
        doc.apply_styles(button, &layout::button(config));
        doc.set_text(button, config.button_text());
        doc.add_listener(button, EventKind::Click);
        doc.append_child(container, button);
        button
    });

    let body = doc.body();
    doc.append_child(body, container);

    WidgetDom {
        container,
        panel,
        qr_container,
        caption,
        button,
    }
}

/// Reflect `state` on the panel and the toggle button.
pub fn apply_state(doc: &mut Document, dom: &WidgetDom, state: PanelState) {
    doc.set_style(dom.panel, "display", state.css_display());
    if let Some(button) = dom.button {
        doc.set_attribute(button, "aria-expanded", aria_expanded(state));
    }
}

fn aria_expanded(state: PanelState) -> &'static str {
    match state {
        PanelState::Expanded => "true",
        PanelState::Collapsed => "false",
    }
}

fn element(doc: &mut Document, tag: &str, id: &str) -> NodeId {
    let node = doc.create_element(tag);
    doc.set_attribute(node, "id", id);
    node
}
