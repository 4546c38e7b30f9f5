//! Badge renderer: (label, count, style) -> SVG document.

use std::fmt::Write;

use crate::error::Result;

use super::format::format_compact;
use super::layout::{self, calc, Layout};
use super::style::{lookup, Decoration, Freeform, Style, StyleId, TwoSegmentStyle};
use super::xml::{check_text, escape};

/// Label used when the caller supplies none.
pub const DEFAULT_LABEL: &str = "Visitors";

const FREEFORM_FONT: &str = "Verdana,Geneva,DejaVu Sans,sans-serif";

// Only reachable if the fallback template itself fails to format.
const MINIMAL_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="20" role="img" aria-label="Error: SVG"><title>Error: SVG</title></svg>"#;

/// Value shown in the count segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count<'a> {
    /// Formatted in compact notation.
    Number(u64),
    /// Shown verbatim (e.g. the `"No Site"` sentinel).
    Text(&'a str),
}

impl From<u64> for Count<'_> {
    fn from(n: u64) -> Self {
        Count::Number(n)
    }
}

impl<'a> From<&'a str> for Count<'a> {
    fn from(s: &'a str) -> Self {
        Count::Text(s)
    }
}

impl Count<'_> {
    pub fn display(&self) -> String {
        match self {
            Count::Number(n) => format_compact(*n),
            Count::Text(s) => (*s).to_string(),
        }
    }
}

/// Outcome of [`render_badge`]: always carries a renderable SVG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Badge(String),
    /// The requested badge failed; this is the `Error: SVG` badge.
    Fallback(String),
}

impl Rendered {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }

    pub fn into_svg(self) -> String {
        match self {
            Rendered::Badge(svg) | Rendered::Fallback(svg) => svg,
        }
    }
}

/// Render a badge, substituting the fallback badge on any fault.
pub fn render(label: Option<&str>, count: Count<'_>, style_id: &str) -> String {
    render_badge(label, count, style_id).into_svg()
}

/// Render a badge, reporting whether the fallback was used.
pub fn render_badge(label: Option<&str>, count: Count<'_>, style_id: &str) -> Rendered {
    match render_checked(label, count, style_id) {
        Ok(svg) => Rendered::Badge(svg),
        Err(e) => {
            tracing::warn!(
                style = %style_id,
                code = e.code().as_str(),
                error = %e,
                "badge render failed, serving fallback"
            );
            Rendered::Fallback(fallback_badge())
        }
    }
}

/// Render a badge, surfacing faults to the caller.
pub fn render_checked(label: Option<&str>, count: Count<'_>, style_id: &str) -> Result<String> {
    let label = label.unwrap_or(DEFAULT_LABEL);
    let count = count.display();
    check_text(label)?;
    check_text(&count)?;

    match lookup(style_id) {
        Style::TwoSegment(style) => two_segment(label, &count, &style),
        Style::Freeform(kind) => freeform(kind, label, &count),
    }
}

/// The `Error: SVG` badge in `flat-red`.
pub fn fallback_badge() -> String {
    match StyleId::FlatRed.style() {
        Style::TwoSegment(style) => {
            two_segment("Error", "SVG", &style).unwrap_or_else(|_| MINIMAL_SVG.to_string())
        }
        Style::Freeform(_) => MINIMAL_SVG.to_string(),
    }
}

fn two_segment(label: &str, count: &str, style: &TwoSegmentStyle) -> Result<String> {
    let Layout {
        label_width,
        count_width,
        total_width,
        label_center_x,
        count_center_x,
        label_text_length,
        count_text_length,
    } = calc(label, count);
    let cfg = &style.config;
    let (l, c) = (escape(label), escape(count));

    let mut out = String::with_capacity(1536);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="20" role="img" aria-label="{l}: {c}">"#
    )?;
    if !cfg.extra_css.is_empty() {
        writeln!(out, "<style>{}</style>", cfg.extra_css)?;
    }
    writeln!(out, "<title>{l}: {c}</title>")?;
    if cfg.shadow {
        writeln!(
            out,
            r##"<linearGradient id="s" x2="0" y2="100%"><stop offset="0" stop-color="#bbb" stop-opacity=".1"/><stop offset="1" stop-opacity=".1"/></linearGradient>"##
        )?;
    }
    writeln!(
        out,
        r##"<clipPath id="r"><rect width="{total_width}" height="20" rx="{}" fill="#fff"/></clipPath>"##,
        cfg.corner_radius
    )?;
    writeln!(out, r#"<g clip-path="url(#r)">"#)?;
    if let Some(decoration) = &style.decoration {
        decorate(&mut out, decoration, total_width, cfg.corner_radius)?;
    }
    writeln!(
        out,
        r#"<rect width="{label_width}" height="20" fill="{}"/>"#,
        cfg.label_color
    )?;
    writeln!(
        out,
        r#"<rect x="{label_width}" width="{count_width}" height="20" fill="{}"/>"#,
        cfg.count_color
    )?;
    if cfg.shadow {
        writeln!(out, r#"<rect width="{total_width}" height="20" fill="url(#s)"/>"#)?;
    }
    writeln!(out, "</g>")?;
    writeln!(
        out,
        r#"<g text-anchor="middle" font-family="{}" text-rendering="geometricPrecision" font-size="110">"#,
        cfg.font_family
    )?;
    text_pair(&mut out, &l, label_center_x, label_text_length, cfg.label_text_color)?;
    text_pair(&mut out, &c, count_center_x, count_text_length, cfg.count_text_color)?;
    writeln!(out, "</g>")?;
    write!(out, "</svg>")?;
    Ok(out)
}

/// Shadow-offset ghost copy followed by the visible copy.
fn text_pair(out: &mut String, text: &str, x: u64, text_length: u64, fill: &str) -> Result<()> {
    writeln!(
        out,
        r##"<text aria-hidden="true" x="{x}" y="150" fill="#010101" fill-opacity=".3" transform="scale(.1)" textLength="{text_length}">{text}</text>"##
    )?;
    writeln!(
        out,
        r#"<text x="{x}" y="140" transform="scale(.1)" fill="{fill}" textLength="{text_length}">{text}</text>"#
    )?;
    Ok(())
}

fn decorate(out: &mut String, decoration: &Decoration, total_width: u64, radius: u32) -> Result<()> {
    match decoration {
        Decoration::Outline { stroke } => writeln!(
            out,
            r#"<rect width="{}" height="19" x="0.5" y="0.5" rx="{radius}" fill="transparent" stroke="{stroke}" stroke-width="1"/>"#,
            total_width.saturating_sub(1)
        )?,
    }
    Ok(())
}

fn freeform(kind: Freeform, label: &str, count: &str) -> Result<String> {
    let (l, c) = (escape(label), escape(count));
    let mut out = String::with_capacity(512);
    match kind {
        Freeform::MinimalistText => {
            let width = (layout::text_units(label) + 2 + layout::text_units(count)) * 8;
            let text = format!("{l}: {c}");
            open_single(&mut out, width, &text)?;
            writeln!(
                out,
                r##"<text x="50%" y="50%" dominant-baseline="central" text-anchor="middle" font-family="{FREEFORM_FONT}" font-size="12" fill="#333">{text}</text>"##
            )?;
        }
        Freeform::SimpleBox => {
            let width = layout::text_units(count) * 8 + 20;
            open_single(&mut out, width, &format!("{l}: {c}"))?;
            writeln!(out, r##"<rect width="100%" height="100%" rx="3" fill="#007ec6"/>"##)?;
            writeln!(
                out,
                r##"<text x="50%" y="50%" dominant-baseline="central" text-anchor="middle" font-family="{FREEFORM_FONT}" font-size="11" fill="#fff">{c}</text>"##
            )?;
        }
        Freeform::SimpleText => {
            let width = layout::text_units(count) * 9;
            open_single(&mut out, width, &format!("{l}: {c}"))?;
            writeln!(
                out,
                r##"<text x="50%" y="50%" dominant-baseline="central" text-anchor="middle" font-family="{FREEFORM_FONT}" font-size="14" font-weight="bold" fill="#007ec6">{c}</text>"##
            )?;
        }
    }
    write!(out, "</svg>")?;
    Ok(out)
}

/// Root element plus `<title>`; `text` is already escaped.
fn open_single(out: &mut String, width: usize, text: &str) -> Result<()> {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="20" role="img" aria-label="{text}">"#
    )?;
    writeln!(out, "<title>{text}</title>")?;
    Ok(())
}
