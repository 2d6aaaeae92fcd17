//! QR styling contract and SVG rendering.
//!
//! [`QrOptions`] mirrors the option object the widget hands to its vector QR
//! renderer (dot style, corner styles, colors, center image). The option
//! names and values are part of the externally visible rendering contract, so
//! the struct serializes to exactly that camelCase shape.
//!
//! [`render_svg`] draws the symbol produced by the `qrcode` crate using those
//! options: round data dots, ring-shaped finder squares with round centers,
//! and an optional center image with the dots underneath it cleared.

use std::fmt::Write as _;

use serde::Serialize;

use crate::widget::WidgetConfig;

/// Data module style.
pub const DOT_STYLE: &str = "dots";

/// Finder pattern style, used for both the outer square and the inner dot.
pub const CORNER_STYLE: &str = "dot";

/// Gap in pixels between the center image and the surrounding dots.
pub const IMAGE_MARGIN: u32 = 5;

/// CORS mode used when loading the center image.
pub const IMAGE_CROSS_ORIGIN: &str = "anonymous";

/// Fraction of the symbol width reserved for the center image.
pub const IMAGE_SIZE_RATIO: f64 = 0.4;

/// Finder patterns are 7x7 modules.
const FINDER_MODULES: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum QrRenderError {
    #[error("QR data is empty")]
    EmptyData,

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundOptions {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    pub cross_origin: &'static str,
    pub margin: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrOptions {
    pub width: u32,
    pub height: u32,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub dots_options: StyleOptions,
    pub corners_square_options: StyleOptions,
    pub corners_dot_options: StyleOptions,
    pub background_options: BackgroundOptions,
    pub image_options: ImageOptions,
}

impl QrOptions {
    /// Options for a widget: colors from the configuration, the center image
    /// from `logo_url` or the site default served by `origin`.
    pub fn for_widget(config: &WidgetConfig, data: String, origin: &str) -> Self {
        let style = |kind| StyleOptions {
            kind,
            color: config.qr_code_color.clone(),
        };

        Self {
            width: config.size,
            height: config.size,
            data,
            image: Some(config.logo_source(origin)),
            dots_options: style(DOT_STYLE),
            corners_square_options: style(CORNER_STYLE),
            corners_dot_options: style(CORNER_STYLE),
            background_options: BackgroundOptions {
                color: config.background_color.clone(),
            },
            image_options: ImageOptions {
                cross_origin: IMAGE_CROSS_ORIGIN,
                margin: IMAGE_MARGIN,
            },
        }
    }

    /// Same styling without a center image.
    pub fn without_image(mut self) -> Self {
        self.image = None;
        self
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the options into a standalone SVG document.
pub fn render_svg(options: &QrOptions) -> Result<String, QrRenderError> {
    if options.data.is_empty() {
        return Err(QrRenderError::EmptyData);
    }

    // The center image hides part of the symbol; use the highest error
    // correction level so the code still scans.
    let level = if options.image.is_some() {
        qrcode::EcLevel::H
    } else {
        qrcode::EcLevel::M
    };
    let code = qrcode::QrCode::with_error_correction_level(options.data.as_bytes(), level)?;
    let n = code.width();
    let colors = code.to_colors();

    let side = options.width.min(options.height) as f64;
    let unit = side / n as f64;
    let image_region = options.image.as_ref().map(|_| image_region(n));

    let fg = escape_attr(&options.dots_options.color);
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height,
    );
    let _ = write!(
        svg,
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        options.width,
        options.height,
        escape_attr(&options.background_options.color)
    );

    // Data dots.
    svg.push_str(&format!(r#"<g fill="{fg}">"#));
    for y in 0..n {
        for x in 0..n {
            if colors[y * n + x] != qrcode::Color::Dark || in_finder(x, y, n) {
                continue;
            }
            if let Some((start, len)) = image_region {
                if (start..start + len).contains(&x) && (start..start + len).contains(&y) {
                    continue;
                }
            }
            let _ = write!(
                svg,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}"/>"#,
                (x as f64 + 0.5) * unit,
                (y as f64 + 0.5) * unit,
                unit / 2.0
            );
        }
    }
    svg.push_str("</g>");

    // Finder patterns: ring of outer diameter 7 modules, dot of diameter 3.
    let square_color = escape_attr(&options.corners_square_options.color);
    let dot_color = escape_attr(&options.corners_dot_options.color);
    for (fx, fy) in [(0, 0), (n - FINDER_MODULES, 0), (0, n - FINDER_MODULES)] {
        let cx = (fx as f64 + 3.5) * unit;
        let cy = (fy as f64 + 3.5) * unit;
        let _ = write!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="none" stroke="{square_color}" stroke-width="{:.2}"/>"#,
            3.0 * unit,
            unit
        );
        let _ = write!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="{dot_color}"/>"#,
            1.5 * unit
        );
    }

    if let (Some(href), Some((start, len))) = (&options.image, image_region) {
        let margin = options.image_options.margin as f64;
        let pos = start as f64 * unit + margin;
        let size = (len as f64 * unit - 2.0 * margin).max(0.0);
        let _ = write!(
            svg,
            r#"<image href="{href}" xlink:href="{href}" x="{pos:.2}" y="{pos:.2}" width="{size:.2}" height="{size:.2}" crossorigin="{}" preserveAspectRatio="xMidYMid meet"/>"#,
            options.image_options.cross_origin,
            href = escape_attr(href),
        );
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Start and length (in modules) of the centered square kept clear for the
/// image. The length has the same parity as `n` so the region is centered.
fn image_region(n: usize) -> (usize, usize) {
    let mut len = (n as f64 * IMAGE_SIZE_RATIO).floor() as usize;
    if len % 2 != n % 2 {
        len = len.saturating_sub(1);
    }
    ((n - len) / 2, len)
}

fn in_finder(x: usize, y: usize, n: usize) -> bool {
    let near = |v: usize| v < FINDER_MODULES;
    let far = |v: usize| v >= n - FINDER_MODULES;
    (near(x) && near(y)) || (far(x) && near(y)) || (near(x) && far(y))
}

/// Escape a value for use inside a double-quoted XML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
