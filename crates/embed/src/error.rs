use floatqr_core::qr::QrRenderError;

/// Failures inside the embed runtime.
///
/// None of these ever reach the host page: configuration failures become the
/// error banner, asset and rendering failures become text fallbacks.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// The script tag has no `data-qr-id` attribute.
    #[error("missing data-qr-id attribute on the widget script tag")]
    MissingIdentifier,

    /// Neither the script origin nor the page location is a usable URL.
    #[error("cannot resolve widget origin from '{0}'")]
    InvalidOrigin(String),

    /// The underlying HTTP request failed (network, DNS, TLS, etc.).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status code.
    #[error("server returned HTTP {0}")]
    HttpStatus(u16),

    /// The response body is not a valid configuration document.
    #[error("malformed widget configuration: {0}")]
    MalformedConfig(#[from] serde_json::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The icon response is not usable SVG markup.
    #[error("invalid icon markup")]
    InvalidIcon,

    /// The configuration has no data to encode.
    #[error("no QR data available")]
    NoQrData,

    #[error(transparent)]
    Render(#[from] QrRenderError),
}
