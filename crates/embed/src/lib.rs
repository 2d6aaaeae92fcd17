//! Embed runtime for the floating QR widget.
//!
//! Implements what the `widget.js` script does on a host page against an
//! in-memory [`dom::Document`]: bootstrap from the script tag, fetch the
//! configuration through a [`source::WidgetSource`], build the widget, render
//! the QR code and drive the collapse/expand interaction. The API service
//! uses the same runtime for server-side previews.

pub mod bootstrap;
pub mod construct;
pub mod dom;
pub mod error;
pub mod icon;
pub mod runtime;
pub mod source;

pub use error::EmbedError;
pub use runtime::{DomEvent, Embed, EmbedOptions, EmbedOutcome, MountedWidget};
pub use source::{HttpWidgetSource, WidgetSource};
