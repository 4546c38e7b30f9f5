//! Badge rendering engine.
//!
//! Leaf-first: [`format`] (compact numbers) and [`layout`] (segment widths)
//! feed the [`style`] registry, and [`render`] composes them into an SVG
//! document.

pub mod format;
pub mod layout;
pub mod render;
pub mod style;
pub mod xml;

pub use format::format_compact;
pub use layout::{calc, Layout};
pub use render::{render, render_badge, render_checked, Count, Rendered, DEFAULT_LABEL};
pub use style::{lookup, Decoration, Freeform, Style, StyleConfig, StyleId, TwoSegmentStyle};
