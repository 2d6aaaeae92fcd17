//! Toggle icon post-processing.
//!
//! Icons are inlined into the button, so they must take the button's text
//! color and a fixed size. Markup that does not look like plain SVG is
//! refused and the button keeps its text label.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::EmbedError;

/// Rendered icon edge length in pixels.
pub const ICON_SIZE_PX: u32 = 24;

static ROOT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<svg\b[^>]*>").expect("valid regex"));

/// `fill`/`stroke` with either quote style; the value is group 2 or 3.
static PAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(fill|stroke)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

static DIMENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s(width|height)\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("valid regex")
});

static UNSAFE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script|<foreignobject|\son[a-z]+\s*=|javascript:"#).expect("valid regex")
});

/// Recolor `markup` to `currentColor` and pin its root size.
///
/// Every `fill`/`stroke` other than `none` becomes `currentColor`.
pub fn recolor_svg(markup: &str) -> Result<String, EmbedError> {
    let markup = markup.trim();
    let Some(root) = ROOT_TAG_RE.find(markup) else {
        return Err(EmbedError::InvalidIcon);
    };
    if UNSAFE_RE.is_match(markup) {
        return Err(EmbedError::InvalidIcon);
    }

    // Drop any XML prolog or comments ahead of the root element.
    let body = &markup[root.start()..];

    let recolored = PAINT_RE.replace_all(body, |caps: &Captures| {
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        if value.trim().eq_ignore_ascii_case("none") {
            caps[0].to_string()
        } else {
            format!(r#"{}="currentColor""#, &caps[1])
        }
    });

    // Recoloring may have changed the root tag's length.
    let Some(root_end) = ROOT_TAG_RE.find(&recolored).map(|m| m.end()) else {
        return Err(EmbedError::InvalidIcon);
    };
    let (root_tag, rest) = recolored.split_at(root_end);
    let root_tag = DIMENSION_RE.replace_all(root_tag, "");
    // The root tag starts with `<svg` in whatever case the source used.
    let (open, attrs) = root_tag.split_at("<svg".len());

    Ok(format!(
        r#"{open} width="{ICON_SIZE_PX}" height="{ICON_SIZE_PX}"{attrs}{rest}"#
    ))
}
