//! Input rules for widget configuration records.
//!
//! The `*_rule` functions have the shape `validator` expects for
//! `#[validate(custom(function = ...))]`; the `validate_*` functions return
//! [`CoreError`] for use outside derive contexts.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::error::CoreError;
use crate::widget::{UrlType, ICON_NONE};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_QR_SIZE: u32 = 50;
pub const MAX_QR_SIZE: u32 = 1000;
pub const MAX_MARGIN: i32 = 500;
pub const MAX_DISPLAY_TEXT_LENGTH: usize = 100;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_URL_LENGTH: usize = 2048;

/// Hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), functional notation
/// (`rgb(...)`, `rgba(...)`, `hsl(...)`, `hsla(...)`) or a named color.
static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|(rgb|rgba|hsl|hsla)\([0-9.,%\s/]+\)|[a-zA-Z]{3,20})$",
    )
    .expect("valid regex")
});

/// Icon names map to `/icons/{name}.svg`; keep them to a safe slug.
static ICON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

pub fn is_valid_color(value: &str) -> bool {
    COLOR_RE.is_match(value.trim())
}

pub fn is_valid_icon_name(value: &str) -> bool {
    value == ICON_NONE || ICON_NAME_RE.is_match(value)
}

fn is_http_url(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub fn color_rule(value: &str) -> Result<(), ValidationError> {
    if is_valid_color(value) {
        Ok(())
    } else {
        Err(ValidationError::new("color").with_message("must be a CSS color".into()))
    }
}

pub fn icon_name_rule(value: &str) -> Result<(), ValidationError> {
    if is_valid_icon_name(value) {
        Ok(())
    } else {
        Err(ValidationError::new("icon_name")
            .with_message("must be 'none' or a lowercase icon slug".into()))
    }
}

pub fn http_url_rule(value: &str) -> Result<(), ValidationError> {
    if is_http_url(value) {
        Ok(())
    } else {
        Err(ValidationError::new("http_url").with_message("must be an http(s) URL".into()))
    }
}

// ---------------------------------------------------------------------------
// Record rules
// ---------------------------------------------------------------------------

/// Custom-URL mode needs a usable `custom_url`; current-URL mode accepts
/// anything (the stored URL is simply never encoded).
pub fn validate_url_source(url_type: UrlType, custom_url: Option<&str>) -> Result<(), CoreError> {
    if url_type != UrlType::Custom {
        return Ok(());
    }
    match custom_url.map(str::trim).filter(|u| !u.is_empty()) {
        None => Err(CoreError::Validation(
            "custom_url is required when url_type is 'custom'".to_string(),
        )),
        Some(url) if !is_http_url(url) => Err(CoreError::Validation(format!(
            "custom_url must be an http(s) URL, got '{url}'"
        ))),
        Some(_) => Ok(()),
    }
}

/// Convert `validator` errors into a single human-readable message.
pub fn describe_errors(errors: &validator::ValidationErrors) -> CoreError {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    parts.sort();
    CoreError::Validation(parts.join("; "))
}
