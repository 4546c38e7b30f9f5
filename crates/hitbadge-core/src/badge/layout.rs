//! Width/offset calculation for two-segment badges.
//!
//! Text is drawn at 10x scale and transformed down by `scale(.1)`, so every
//! text position and `textLength` below is the pixel value times ten.

/// Estimated label glyph width at the badge's 11px font.
pub const LABEL_GLYPH_WIDTH: f64 = 6.5;
/// Estimated count glyph width (digits run slightly wider).
pub const COUNT_GLYPH_WIDTH: f64 = 7.0;
/// Horizontal padding per segment, 10 units per side.
pub const SEGMENT_PADDING: f64 = 20.0;
/// Scale factor between text coordinates and badge pixels.
pub const TEXT_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub label_width: u64,
    pub count_width: u64,
    pub total_width: u64,
    pub label_center_x: u64,
    pub count_center_x: u64,
    pub label_text_length: u64,
    pub count_text_length: u64,
}

/// Number of width units in `s`: UTF-16 code units, which is what the
/// glyph-width estimates were tuned against.
pub fn text_units(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Compute the layout for a `label` / `count` pair. Each field is rounded
/// independently, half away from zero.
pub fn calc(label: &str, count: &str) -> Layout {
    let label_text_width = text_units(label) as f64 * LABEL_GLYPH_WIDTH;
    let count_text_width = text_units(count) as f64 * COUNT_GLYPH_WIDTH;

    let label_width = round(label_text_width + SEGMENT_PADDING);
    let count_width = round(count_text_width + SEGMENT_PADDING);
    let (lw, cw) = (label_width as f64, count_width as f64);

    Layout {
        label_width,
        count_width,
        total_width: label_width + count_width,
        label_center_x: round(lw / 2.0 * TEXT_SCALE),
        count_center_x: round((lw + cw / 2.0) * TEXT_SCALE),
        label_text_length: round(label_text_width * TEXT_SCALE),
        count_text_length: round(count_text_width * TEXT_SCALE),
    }
}

fn round(v: f64) -> u64 {
    // Inputs are never negative; `as` saturates on absurd lengths.
    v.round() as u64
}
