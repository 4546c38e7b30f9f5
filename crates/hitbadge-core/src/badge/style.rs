//! Style registry.
//!
//! A closed set of style identifiers, each resolved at compile time to either
//! a parameterized two-segment template or a dedicated freeform renderer.
//! Unknown identifiers fall back to [`StyleId::Classic`].

const DEFAULT_FONT: &str = "Verdana,Geneva,DejaVu Sans,sans-serif";

/// Known style identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleId {
    Classic,
    FlatGreen,
    FlatRed,
    FlatYellow,
    FlatPurple,
    PillBlue,
    PillGreen,
    DarkMode,
    Corporate,
    RetroPixel,
    MinimalistText,
    SimpleBox,
    SimpleText,
    OutlineBlue,
}

impl StyleId {
    pub const ALL: [StyleId; 14] = [
        StyleId::Classic,
        StyleId::FlatGreen,
        StyleId::FlatRed,
        StyleId::FlatYellow,
        StyleId::FlatPurple,
        StyleId::PillBlue,
        StyleId::PillGreen,
        StyleId::DarkMode,
        StyleId::Corporate,
        StyleId::RetroPixel,
        StyleId::MinimalistText,
        StyleId::SimpleBox,
        StyleId::SimpleText,
        StyleId::OutlineBlue,
    ];

    /// Wire name used in the `style` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleId::Classic => "classic",
            StyleId::FlatGreen => "flat-green",
            StyleId::FlatRed => "flat-red",
            StyleId::FlatYellow => "flat-yellow",
            StyleId::FlatPurple => "flat-purple",
            StyleId::PillBlue => "pill-blue",
            StyleId::PillGreen => "pill-green",
            StyleId::DarkMode => "dark-mode",
            StyleId::Corporate => "corporate",
            StyleId::RetroPixel => "retro-pixel",
            StyleId::MinimalistText => "minimalist-text",
            StyleId::SimpleBox => "simple-box",
            StyleId::SimpleText => "simple-text",
            StyleId::OutlineBlue => "outline-blue",
        }
    }

    /// Exact-match parse of a wire name.
    pub fn parse(s: &str) -> Option<StyleId> {
        StyleId::ALL.into_iter().find(|id| id.as_str() == s)
    }

    pub fn style(self) -> Style {
        match self {
            StyleId::Classic => two_segment(CLASSIC),
            StyleId::FlatGreen => two_segment(FLAT_GREEN),
            StyleId::FlatRed => two_segment(FLAT_RED),
            StyleId::FlatYellow => two_segment(FLAT_YELLOW),
            StyleId::FlatPurple => two_segment(FLAT_PURPLE),
            StyleId::PillBlue => two_segment(PILL_BLUE),
            StyleId::PillGreen => two_segment(PILL_GREEN),
            StyleId::DarkMode => two_segment(DARK_MODE),
            StyleId::Corporate => two_segment(CORPORATE),
            StyleId::RetroPixel => two_segment(RETRO_PIXEL),
            StyleId::MinimalistText => Style::Freeform(Freeform::MinimalistText),
            StyleId::SimpleBox => Style::Freeform(Freeform::SimpleBox),
            StyleId::SimpleText => Style::Freeform(Freeform::SimpleText),
            StyleId::OutlineBlue => Style::TwoSegment(TwoSegmentStyle {
                config: OUTLINE_BLUE,
                decoration: Some(Decoration::Outline { stroke: "#007ec6" }),
            }),
        }
    }
}

/// Resolve a style by wire name, falling back to `classic`.
pub fn lookup(style_id: &str) -> Style {
    StyleId::parse(style_id).unwrap_or(StyleId::Classic).style()
}

/// Parameters for the shared two-segment template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleConfig {
    pub label_color: &'static str,
    pub count_color: &'static str,
    pub label_text_color: &'static str,
    pub count_text_color: &'static str,
    pub shadow: bool,
    pub corner_radius: u32,
    pub font_family: &'static str,
    /// Raw CSS placed in a `<style>` element; empty means none.
    pub extra_css: &'static str,
}

impl StyleConfig {
    pub const BASE: StyleConfig = StyleConfig {
        label_color: "#555",
        count_color: "#007ec6",
        label_text_color: "#fff",
        count_text_color: "#fff",
        shadow: true,
        corner_radius: 3,
        font_family: DEFAULT_FONT,
        extra_css: "",
    };
}

/// Extra markup layered onto the two-segment template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Stroked rectangle inset half a pixel inside the clip group.
    Outline { stroke: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoSegmentStyle {
    pub config: StyleConfig,
    pub decoration: Option<Decoration>,
}

/// Single-segment styles with their own width computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freeform {
    /// `label: count` as plain text.
    MinimalistText,
    /// Count only, on a filled rounded box.
    SimpleBox,
    /// Count only, bold colored text.
    SimpleText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    TwoSegment(TwoSegmentStyle),
    Freeform(Freeform),
}

fn two_segment(config: StyleConfig) -> Style {
    Style::TwoSegment(TwoSegmentStyle { config, decoration: None })
}

const CLASSIC: StyleConfig = StyleConfig::BASE;

const FLAT_GREEN: StyleConfig = StyleConfig {
    count_color: "#4c1",
    shadow: false,
    ..StyleConfig::BASE
};

const FLAT_RED: StyleConfig = StyleConfig {
    count_color: "#e05d44",
    shadow: false,
    ..StyleConfig::BASE
};

const FLAT_YELLOW: StyleConfig = StyleConfig {
    count_color: "#dfb317",
    count_text_color: "#333",
    shadow: false,
    ..StyleConfig::BASE
};

const FLAT_PURPLE: StyleConfig = StyleConfig {
    count_color: "#9778cd",
    shadow: false,
    ..StyleConfig::BASE
};

const PILL_BLUE: StyleConfig = StyleConfig {
    corner_radius: 10,
    ..StyleConfig::BASE
};

const PILL_GREEN: StyleConfig = StyleConfig {
    count_color: "#4c1",
    shadow: false,
    corner_radius: 10,
    ..StyleConfig::BASE
};

const DARK_MODE: StyleConfig = StyleConfig {
    label_color: "#222",
    count_color: "#333",
    shadow: false,
    corner_radius: 4,
    ..StyleConfig::BASE
};

const CORPORATE: StyleConfig = StyleConfig {
    label_color: "#f0f0f0",
    count_color: "#f0f0f0",
    label_text_color: "#004a99",
    count_text_color: "#004a99",
    shadow: false,
    corner_radius: 0,
    ..StyleConfig::BASE
};

const RETRO_PIXEL: StyleConfig = StyleConfig {
    label_color: "#333",
    count_color: "#E47911",
    shadow: false,
    corner_radius: 0,
    font_family: "'VT323', monospace",
    extra_css: "@import url('https://fonts.googleapis.com/css2?family=VT323');",
    ..StyleConfig::BASE
};

const OUTLINE_BLUE: StyleConfig = StyleConfig {
    label_color: "transparent",
    count_color: "transparent",
    label_text_color: "#007ec6",
    count_text_color: "#007ec6",
    shadow: false,
    ..StyleConfig::BASE
};
