//! Domain types and rules for the floating QR widget.
//!
//! Everything in this crate is pure: no I/O, no async. The configuration
//! store, the HTTP service and the embed runtime all build on these types so
//! the wire contract is defined in exactly one place.

pub mod error;
pub mod layout;
pub mod overrides;
pub mod panel;
pub mod qr;
pub mod types;
pub mod validation;
pub mod visibility;
pub mod widget;
