//! Unicode utilities for text display.
//!
//! Helpers for slicing text without splitting UTF-8 sequences or
//! user-perceived characters, used when previewing long contexts.

use unicode_segmentation::UnicodeSegmentation;

/// Finds a valid UTF-8 character boundary at or before the given position.
///
/// # Examples
///
/// ```
/// use opinion_contexts::io::find_char_boundary;
///
/// let s = "Hello 世界";
/// assert_eq!(find_char_boundary(s, 6), 6); // Before '世'
/// assert_eq!(find_char_boundary(s, 7), 6); // Middle of '世', backs up
/// ```
#[must_use]
pub const fn find_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut boundary = pos;
    // UTF-8 continuation bytes start with 10xxxxxx (0x80-0xBF)
    while boundary > 0 && (bytes[boundary] & 0xC0) == 0x80 {
        boundary -= 1;
    }
    boundary
}

/// Counts the number of grapheme clusters in a string.
///
/// # Examples
///
/// ```
/// use opinion_contexts::io::unicode::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("世界"), 2);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
///
/// Returns a slice containing at most `max_graphemes` grapheme clusters.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let mut end_byte = 0;

    for (count, grapheme) in s.graphemes(true).enumerate() {
        if count >= max_graphemes {
            break;
        }
        end_byte += grapheme.len();
    }

    &s[..end_byte]
}

/// Shortens text for one-line previews, appending `...` when cut.
#[must_use]
pub fn preview(s: &str, max_graphemes: usize) -> String {
    let flat = s.replace('\n', " ");
    if grapheme_count(&flat) <= max_graphemes {
        return flat;
    }
    if max_graphemes <= 3 {
        return truncate_graphemes(&flat, max_graphemes).to_string();
    }
    format!("{}...", truncate_graphemes(&flat, max_graphemes - 3))
}
