// Text formatters
//
// Shared helpers for fitting record text into table cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Collapse newlines and runs of whitespace into single spaces
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to `width` display columns, ending with '…' when cut
///
/// Uses unicode display width (not byte length) so wide glyphs count twice.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    // Leave room for the ellipsis (1 column)
    let target = width - 1;
    let mut current = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > target {
            break;
        }
        current += w;
        out.push(c);
    }
    out.push('…');
    out
}
