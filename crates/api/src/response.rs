//! Shared response envelope types for API handlers.
//!
//! Management responses use a `{ "data": ... }` envelope. The public widget
//! document is served bare because embeds read its fields directly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
