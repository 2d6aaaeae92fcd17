//! Files embeds load directly from this service: the default logo and the
//! toggle icons.
//!
//! The browser bundle (`widget.js`) is built and published with the host
//! site's front end, not served from here.

use std::path::Path;

use axum::Router;
use floatqr_core::widget::DEFAULT_LOGO_PATH;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Directory under `STATIC_DIR` holding `{name}.svg` toggle icons.
pub const ICONS_DIR: &str = "icons";

/// Path of the default logo inside `static_dir`.
pub fn default_logo_file(static_dir: &Path) -> std::path::PathBuf {
    static_dir.join(DEFAULT_LOGO_PATH.trim_start_matches('/'))
}

/// ```text
/// GET /logo.png
/// GET /icons/{name}.svg
/// ```
pub fn router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service(DEFAULT_LOGO_PATH, ServeFile::new(default_logo_file(static_dir)))
        .nest_service("/icons", ServeDir::new(static_dir.join(ICONS_DIR)))
}
