//! Server-side widget preview.
//!
//! Runs the embed runtime against a simulated page and returns the markup it
//! produced. Configuration and icons come straight from the store and the
//! static directory rather than over HTTP.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use floatqr_core::error::CoreError;
use floatqr_core::overrides::{
    ATTR_BUTTON_ICON, ATTR_BUTTON_SHAPE, ATTR_DISPLAY_TEXT, ATTR_POSITION, ATTR_QR_ID,
    ATTR_SHOW_BUTTON,
};
use floatqr_core::validation::is_valid_icon_name;
use floatqr_core::widget::WidgetConfig;
use floatqr_db::DbPool;
use floatqr_embed::dom::Document;
use floatqr_embed::{Embed, EmbedError, EmbedOptions, EmbedOutcome, WidgetSource};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::widget_config::load_servable_config;
use crate::routes::static_assets::ICONS_DIR;
use crate::state::AppState;

/// Viewport width used when the request does not give one.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 1024;

/// Origin assumed when the request carries no `Host` header.
const FALLBACK_ORIGIN: &str = "http://localhost";

/// Scheme set by a TLS-terminating proxy.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

// ---------------------------------------------------------------------------
// StoreSource
// ---------------------------------------------------------------------------

/// [`WidgetSource`] backed by the database and the static asset directory.
///
/// Failures are reported with the status the equivalent HTTP route would
/// have answered.
pub struct StoreSource {
    pool: DbPool,
    static_dir: PathBuf,
}

impl StoreSource {
    pub fn new(pool: DbPool, static_dir: PathBuf) -> Self {
        Self { pool, static_dir }
    }
}

#[async_trait]
impl WidgetSource for StoreSource {
    async fn fetch_config(
        &self,
        _origin: &str,
        widget_id: &str,
    ) -> Result<WidgetConfig, EmbedError> {
        load_servable_config(&self.pool, widget_id)
            .await
            .map_err(|e| match e {
                AppError::Core(CoreError::NotFound { .. }) => EmbedError::HttpStatus(404),
                other => {
                    tracing::error!(widget_id, error = %other, "Preview configuration load failed");
                    EmbedError::HttpStatus(500)
                }
            })
    }

    async fn fetch_icon(&self, _origin: &str, name: &str) -> Result<String, EmbedError> {
        if !is_valid_icon_name(name) {
            return Err(EmbedError::HttpStatus(404));
        }
        let path = self.static_dir.join(ICONS_DIR).join(format!("{name}.svg"));
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Icon file unavailable");
            EmbedError::HttpStatus(404)
        })
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Simulated page and optional script-tag overrides.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    /// Viewport width in pixels.
    pub width: Option<u32>,
    /// Host page URL; defaults to this service's root.
    pub url: Option<String>,
    pub position: Option<String>,
    pub button_shape: Option<String>,
    pub display_text: Option<String>,
    pub button_icon: Option<String>,
    pub show_button: Option<String>,
}

/// Public origin of this request: `X-Forwarded-Proto` (when `http` or
/// `https`) as the scheme, `Host` as the authority.
fn request_origin(headers: &HeaderMap) -> String {
    let Some(host) = headers.get(HOST).and_then(|h| h.to_str().ok()) else {
        return FALLBACK_ORIGIN.to_string();
    };
    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());
    format!("{scheme}://{host}")
}

/// GET /api/widget/{id}/preview
///
/// 200 with the widget container's HTML, 204 when the device gate hides the
/// widget for the requested width, 404 when the widget cannot be served.
pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(params): Query<PreviewParams>,
) -> AppResult<Response> {
    let origin = request_origin(&headers);
    let location = params.url.clone().unwrap_or_else(|| format!("{origin}/"));

    let mut doc = Document::new(location, params.width.unwrap_or(DEFAULT_PREVIEW_WIDTH));
    let mut attributes = vec![(ATTR_QR_ID, id.as_str())];
    let overrides = [
        (ATTR_POSITION, &params.position),
        (ATTR_BUTTON_SHAPE, &params.button_shape),
        (ATTR_DISPLAY_TEXT, &params.display_text),
        (ATTR_BUTTON_ICON, &params.button_icon),
        (ATTR_SHOW_BUTTON, &params.show_button),
    ];
    for (name, value) in overrides {
        if let Some(value) = value {
            attributes.push((name, value.as_str()));
        }
    }
    let script = doc.append_script(&format!("{origin}/widget.js"), &attributes);
    doc.set_current_script(Some(script));

    let source = StoreSource::new(state.pool.clone(), state.config.static_dir.clone());
    let options = EmbedOptions {
        render_delay: Duration::ZERO,
        ..EmbedOptions::default()
    };

    match Embed::new(source, options).run(&mut doc).await {
        EmbedOutcome::Mounted(widget) => Ok(Html(doc.to_html(widget.dom.container)).into_response()),
        EmbedOutcome::Hidden => Ok(StatusCode::NO_CONTENT.into_response()),
        EmbedOutcome::Failed(EmbedError::HttpStatus(404)) => Err(AppError::widget_not_found(id)),
        EmbedOutcome::Failed(e) | EmbedOutcome::Aborted(e) => {
            Err(AppError::InternalError(format!("Preview failed: {e}")))
        }
        EmbedOutcome::Skipped => Err(AppError::InternalError(
            "Preview script tag was not processed".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn origin_defaults_to_http() {
        assert_eq!(request_origin(&headers(&[("host", "qr.test")])), "http://qr.test");
    }

    #[test]
    fn origin_uses_forwarded_proto() {
        let map = headers(&[("host", "qr.test"), ("x-forwarded-proto", "HTTPS, http")]);
        assert_eq!(request_origin(&map), "https://qr.test");
    }

    #[test]
    fn unknown_forwarded_proto_is_ignored() {
        let map = headers(&[("host", "qr.test:8080"), ("x-forwarded-proto", "gopher")]);
        assert_eq!(request_origin(&map), "http://qr.test:8080");
    }

    #[test]
    fn missing_host_falls_back_to_localhost() {
        assert_eq!(request_origin(&HeaderMap::new()), FALLBACK_ORIGIN);
    }
}
