//! Text utilities for cell display.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// The character appended to truncated cell text.
pub const ELLIPSIS: char = '…';

/// Truncates `text` to at most `max_width` display columns, ellipsis
/// included.
///
/// Returns `None` when the text already fits. Widths are measured in
/// terminal display columns, so wide characters count double.
pub fn truncate_to_width(text: &str, max_width: usize) -> Option<String> {
    if text.width() <= max_width {
        return None;
    }

    let budget = max_width.saturating_sub(ELLIPSIS.width().unwrap_or(1));
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        truncated.push(ch);
        used += w;
    }
    truncated.push(ELLIPSIS);
    Some(truncated)
}
