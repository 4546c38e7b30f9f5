//! XML text helpers for badge markup.

use std::borrow::Cow;

use crate::error::{BadgeError, Result};

/// Reject characters that XML 1.0 cannot carry (C0 controls other than
/// tab/LF/CR, and the U+FFFE/U+FFFF noncharacters).
pub fn check_text(s: &str) -> Result<()> {
    match s.chars().find(|c| !is_xml_char(*c)) {
        Some(_) => Err(BadgeError::InvalidText(s.to_string())),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}
