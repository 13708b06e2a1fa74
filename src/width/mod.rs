//! Display width helpers.
//!
//! Content lines are measured in terminal-style display cells so truncation
//! keeps double-width glyphs intact instead of cutting on `char` counts.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Compute the display width of a string in cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate `text` so its display width does not exceed `max` cells.
pub fn clip_to_width(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.trim_end().to_string()
}
