//! End-to-end widget lifecycle on a host page.
//!
//! [`Embed::run`] performs one bootstrap: claim the script tag, fetch the
//! configuration, apply tag overrides, gate on the device class, build the
//! element tree, then finish the deferred work. The QR render (after
//! [`EmbedOptions::render_delay`]) and the icon fetch run concurrently and
//! each is applied to the document as soon as it completes; a failure in one
//! never affects the other.
//!
//! Nothing escapes to the host page: every failure ends up as the error
//! banner, a text fallback or a log line, and is reported through
//! [`EmbedOutcome`].

use std::time::Duration;

use floatqr_core::layout;
use floatqr_core::panel::{PanelEvent, PanelMachine, PanelState};
use floatqr_core::qr::{render_svg, QrOptions};
use floatqr_core::visibility::should_render;
use floatqr_core::widget::WidgetConfig;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};

use crate::bootstrap::{bootstrap, Bootstrap};
use crate::construct::{self, WidgetDom};
use crate::dom::{Document, EventKind, NodeId};
use crate::error::EmbedError;
use crate::icon::recolor_svg;
use crate::source::WidgetSource;

pub const ERROR_BANNER_ID: &str = "qr-widget-error";

/// Shown in the QR container when the code cannot be drawn.
pub const QR_FALLBACK_TEXT: &str = "QR code unavailable";

/// Set on the QR container to the data the rendered code encodes.
pub const ATTR_QR_PAYLOAD: &str = "data-qr-payload";

/// Timing knobs for the runtime.
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    /// Deadline for the configuration fetch.
    pub fetch_timeout: Duration,
    /// Deadline for the toggle icon fetch.
    pub icon_timeout: Duration,
    /// Wait between attaching the container and drawing the QR code.
    pub render_delay: Duration,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            icon_timeout: Duration::from_secs(5),
            render_delay: Duration::from_millis(100),
        }
    }
}

/// Result of one [`Embed::run`].
#[derive(Debug)]
pub enum EmbedOutcome {
    /// No unprocessed script tag was found.
    Skipped,
    /// The tag was unusable (no identifier, bad origin). Logged only.
    Aborted(EmbedError),
    /// The configuration could not be loaded. The error banner is shown.
    Failed(EmbedError),
    /// The device gate hid the widget.
    Hidden,
    Mounted(MountedWidget),
}

impl EmbedOutcome {
    pub fn mounted(self) -> Option<MountedWidget> {
        match self {
            EmbedOutcome::Mounted(widget) => Some(widget),
            _ => None,
        }
    }
}

pub struct Embed<S> {
    source: S,
    options: EmbedOptions,
}

/// Deferred work completing after construction.
enum Deferred {
    QrDue,
    Icon(NodeId, Result<String, EmbedError>),
}

impl<S: WidgetSource> Embed<S> {
    pub fn new(source: S, options: EmbedOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Bootstrap one widget on `doc`.
    pub async fn run(&self, doc: &mut Document) -> EmbedOutcome {
        let boot = match bootstrap(doc) {
            Ok(Some(boot)) => boot,
            Ok(None) => return EmbedOutcome::Skipped,
            Err(e) => {
                tracing::error!(error = %e, "Widget script tag is unusable");
                return EmbedOutcome::Aborted(e);
            }
        };

        let config = match self.load_config(&boot).await {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(
                    widget_id = %boot.widget_id,
                    error = %e,
                    "Failed to load widget configuration"
                );
                show_error_banner(doc, &e);
                return EmbedOutcome::Failed(e);
            }
        };
        let config = boot.overrides.apply(config);

        if !should_render(&config, doc.viewport_width()) {
            tracing::info!(
                widget_id = %boot.widget_id,
                viewport_width = doc.viewport_width(),
                "Widget disabled for this device class"
            );
            return EmbedOutcome::Hidden;
        }

        let machine = PanelMachine::new(&config);
        let dom = construct::build(doc, &config, machine.state());
        if machine.listens_for_scroll() {
            doc.add_window_listener(EventKind::Scroll);
        }
        tracing::debug!(widget_id = %boot.widget_id, "Widget mounted");

        self.finish(doc, &config, &dom, &boot.origin).await;

        EmbedOutcome::Mounted(MountedWidget {
            config,
            machine,
            dom,
        })
    }

    async fn load_config(&self, boot: &Bootstrap) -> Result<WidgetConfig, EmbedError> {
        tokio::time::timeout(
            self.options.fetch_timeout,
            self.source.fetch_config(&boot.origin, &boot.widget_id),
        )
        .await
        .map_err(|_| EmbedError::Timeout)?
    }

    async fn load_icon(&self, origin: &str, name: &str) -> Result<String, EmbedError> {
        let markup = tokio::time::timeout(
            self.options.icon_timeout,
            self.source.fetch_icon(origin, name),
        )
        .await
        .map_err(|_| EmbedError::Timeout)??;
        recolor_svg(&markup)
    }

    /// Run the QR render and icon fetch, applying each as it completes.
    async fn finish(&self, doc: &mut Document, config: &WidgetConfig, dom: &WidgetDom, origin: &str) {
        let mut tasks: FuturesUnordered<BoxFuture<'_, Deferred>> = FuturesUnordered::new();

        let delay = self.options.render_delay;
        tasks.push(
            async move {
                tokio::time::sleep(delay).await;
                Deferred::QrDue
            }
            .boxed(),
        );

        if let (Some(button), Some(name)) = (dom.button, config.button_icon.name()) {
            tasks.push(
                async move { Deferred::Icon(button, self.load_icon(origin, name).await) }.boxed(),
            );
        }

        while let Some(done) = tasks.next().await {
            match done {
                Deferred::QrDue => render_qr(doc, config, dom, origin),
                Deferred::Icon(button, Ok(svg)) => {
                    if doc.is_connected(button) {
                        doc.set_inner_html(button, svg);
                    }
                }
                Deferred::Icon(_, Err(e)) => {
                    tracing::debug!(error = %e, "Toggle icon unavailable, keeping text label");
                }
            }
        }
    }
}

/// Draw the QR code into its container, reading the page location now.
fn render_qr(doc: &mut Document, config: &WidgetConfig, dom: &WidgetDom, origin: &str) {
    if !doc.is_connected(dom.qr_container) {
        tracing::debug!("QR container detached before render");
        return;
    }

    let rendered = config
        .qr_data(doc.location())
        .ok_or(EmbedError::NoQrData)
        .and_then(|data| {
            let options = QrOptions::for_widget(config, data, origin);
            let svg = render_svg(&options)?;
            Ok((options.data, svg))
        });

    match rendered {
        Ok((data, svg)) => {
            doc.set_attribute(dom.qr_container, ATTR_QR_PAYLOAD, &data);
            doc.set_inner_html(dom.qr_container, svg);
        }
        Err(e) => {
            tracing::warn!(widget_id = %config.id, error = %e, "QR code rendering failed");
            doc.set_text(dom.qr_container, QR_FALLBACK_TEXT);
        }
    }
}

/// Show (or update) the fixed error banner.
fn show_error_banner(doc: &mut Document, error: &EmbedError) {
    let banner = match doc.get_element_by_id(ERROR_BANNER_ID) {
        Some(existing) => existing,
        None => {
            let banner = doc.create_element("div");
            doc.set_attribute(banner, "id", ERROR_BANNER_ID);
            doc.set_attribute(banner, "role", "alert");
            doc.apply_styles(banner, &layout::error_banner());
            let body = doc.body();
            doc.append_child(body, banner);
            banner
        }
    };
    doc.set_text(banner, &format!("QR widget failed to load: {error}"));
}

// ---------------------------------------------------------------------------
// MountedWidget
// ---------------------------------------------------------------------------

/// Host-page events routed to a mounted widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    /// A click whose target is the given node.
    Click(NodeId),
    /// The window scrolled; the offset is read from the document.
    Scroll,
}

/// A widget attached to a document, holding its interaction state.
#[derive(Debug, Clone)]
pub struct MountedWidget {
    config: WidgetConfig,
    machine: PanelMachine,
    pub dom: WidgetDom,
}

impl MountedWidget {
    /// Effective configuration after tag overrides.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> PanelState {
        self.machine.state()
    }

    /// Feed a host-page event. Returns the new state when it changed.
    pub fn dispatch(&mut self, doc: &mut Document, event: DomEvent) -> Option<PanelState> {
        let panel_event = match event {
            DomEvent::Click(target) => {
                let button = self.dom.button?;
                if !doc.is_inclusive_descendant(target, button) {
                    return None;
                }
                PanelEvent::ToggleClicked
            }
            DomEvent::Scroll => PanelEvent::Scrolled {
                scroll_y: doc.scroll_y(),
            },
        };

        let was_listening = self.machine.listens_for_scroll();
        let changed = self.machine.handle(panel_event);
        if was_listening && !self.machine.listens_for_scroll() {
            doc.remove_window_listener(EventKind::Scroll);
        }

        if let Some(state) = changed {
            construct::apply_state(doc, &self.dom, state);
        }
        changed
    }
}
