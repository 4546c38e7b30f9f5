//! hitbadge core: error types and the SVG badge rendering engine.
//!
//! This crate turns a `(label, count, style)` triple into a complete SVG
//! document. Widths are computed analytically from character counts rather
//! than through a layout engine, so output is a pure function of the input.
//! It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Rendering faults
//! surface as `BadgeError` from [`badge::render_checked`]; the public
//! [`badge::render`] entry point converts them into a fixed fallback badge.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod badge;
pub mod error;

/// Shared result type.
pub use error::{BadgeError, ErrorCode, Result};
