//! Where the runtime gets its configuration and icons from.
//!
//! [`WidgetSource`] is the seam between the runtime and the network.
//! [`HttpWidgetSource`] talks to a deployed widget service; the API crate
//! plugs in a store-backed source for server-side previews.

use std::time::Duration;

use async_trait::async_trait;
use floatqr_core::widget::WidgetConfig;
use reqwest::Url;

use crate::error::EmbedError;

/// HTTP timeout applied by the client itself, independent of the runtime's
/// own per-call deadline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait WidgetSource: Send + Sync {
    /// Fetch the configuration document for `widget_id` from `origin`.
    async fn fetch_config(&self, origin: &str, widget_id: &str)
        -> Result<WidgetConfig, EmbedError>;

    /// Fetch the raw SVG markup of the named toggle icon.
    async fn fetch_icon(&self, origin: &str, name: &str) -> Result<String, EmbedError>;
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

/// `{origin}/api/widget/{id}` with the id percent-encoded as one segment.
pub fn config_url(origin: &str, widget_id: &str) -> Result<Url, EmbedError> {
    origin_url(origin, &["api", "widget", widget_id])
}

/// `{origin}/icons/{name}.svg`.
pub fn icon_url(origin: &str, name: &str) -> Result<Url, EmbedError> {
    origin_url(origin, &["icons", &format!("{name}.svg")])
}

fn origin_url(origin: &str, segments: &[&str]) -> Result<Url, EmbedError> {
    let mut url =
        Url::parse(origin).map_err(|_| EmbedError::InvalidOrigin(origin.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| EmbedError::InvalidOrigin(origin.to_string()))?
        .clear()
        .extend(segments);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

// ---------------------------------------------------------------------------
// HttpWidgetSource
// ---------------------------------------------------------------------------

/// Fetches configuration and icons over HTTP. Requests carry no credentials.
pub struct HttpWidgetSource {
    client: reqwest::Client,
}

impl HttpWidgetSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }

    /// Use an existing client, e.g. one shared with the rest of the host.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, EmbedError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(EmbedError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for HttpWidgetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WidgetSource for HttpWidgetSource {
    async fn fetch_config(
        &self,
        origin: &str,
        widget_id: &str,
    ) -> Result<WidgetConfig, EmbedError> {
        let url = config_url(origin, widget_id)?;
        tracing::debug!(%url, "Fetching widget configuration");
        let body = self.get_bytes(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_icon(&self, origin: &str, name: &str) -> Result<String, EmbedError> {
        let url = icon_url(origin, name)?;
        let body = self.get_bytes(url).await?;
        String::from_utf8(body).map_err(|_| EmbedError::InvalidIcon)
    }
}
