//! Locating the embedding `<script>` tag and reading its attributes.

use floatqr_core::overrides::{TagOverrides, ATTR_QR_ID};
use reqwest::Url;

use crate::dom::{Document, NodeId};
use crate::error::EmbedError;

/// Marker set on a tag once it has been bootstrapped.
pub const ATTR_PROCESSED: &str = "data-processed";

/// Substring identifying the widget script in a tag's `src`.
pub const SCRIPT_NAME: &str = "widget.js";

/// Everything read from the script tag before the configuration fetch.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub script: NodeId,
    pub widget_id: String,
    pub overrides: TagOverrides,
    /// Scheme, host and port the script was served from.
    pub origin: String,
}

/// The tag to bootstrap from: the currently executing script, or else the
/// first widget script not yet processed.
pub fn locate_script(doc: &Document) -> Option<NodeId> {
    if let Some(script) = doc.current_script() {
        return Some(script);
    }
    doc.elements_by_tag("script").into_iter().find(|script| {
        doc.attribute(*script, "src")
            .is_some_and(|src| src.contains(SCRIPT_NAME))
            && !doc.has_attribute(*script, ATTR_PROCESSED)
    })
}

/// Claim the script tag and read its configuration.
///
/// Returns `Ok(None)` when there is no tag to process (none found, or it was
/// already processed). The tag is marked processed before the identifier is
/// checked, so a broken tag is reported once.
pub fn bootstrap(doc: &mut Document) -> Result<Option<Bootstrap>, EmbedError> {
    let Some(script) = locate_script(doc) else {
        tracing::debug!("No unprocessed widget script tag found");
        return Ok(None);
    };
    if doc.attribute(script, ATTR_PROCESSED) == Some("true") {
        tracing::debug!("Widget script tag already processed, skipping");
        return Ok(None);
    }
    doc.set_attribute(script, ATTR_PROCESSED, "true");

    let widget_id = doc
        .attribute(script, ATTR_QR_ID)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(EmbedError::MissingIdentifier)?
        .to_string();

    let page: &Document = doc;
    let (overrides, rejected) = TagOverrides::from_attributes(|name| page.attribute(script, name));
    for r in &rejected {
        tracing::warn!(
            attribute = r.attribute,
            value = %r.value,
            "Ignoring unrecognised script attribute value"
        );
    }

    let src = page.attribute(script, "src").unwrap_or_default();
    let origin = script_origin(src, page.location())?;

    Ok(Some(Bootstrap {
        script,
        widget_id,
        overrides,
        origin,
    }))
}

/// Origin of `src`, resolved against the page `location` when relative.
pub fn script_origin(src: &str, location: &str) -> Result<String, EmbedError> {
    let resolved = match Url::parse(location) {
        Ok(base) => base.join(src),
        Err(_) => Url::parse(src),
    }
    .map_err(|_| EmbedError::InvalidOrigin(src.to_string()))?;

    let origin = resolved.origin();
    if !origin.is_tuple() {
        return Err(EmbedError::InvalidOrigin(src.to_string()));
    }
    Ok(origin.ascii_serialization())
}
