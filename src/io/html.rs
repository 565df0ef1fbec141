//! HTML to prose conversion.
//!
//! Document sources may hand back page markup rather than text. Sentence
//! segmentation needs prose, so scripts, styles, and tags are removed and the
//! common entities decoded. Block-level closing tags become line breaks so
//! paragraphs stay separate sentences.

use crate::error::{Result, SegmentError};
use crate::io::unicode::find_char_boundary;
use regex::Regex;

/// Strips markup from HTML documents.
///
/// # Examples
///
/// ```
/// use opinion_contexts::io::HtmlStripper;
///
/// let stripper = HtmlStripper::new().unwrap();
/// let text = stripper.strip("<p>The cat <b>sat</b>.</p><p>Birds &amp; bees.</p>");
/// assert_eq!(text, "The cat sat.\nBirds & bees.");
/// ```
#[derive(Debug, Clone)]
pub struct HtmlStripper {
    hidden: Regex,
    block: Regex,
    tag: Regex,
    spaces: Regex,
    blank_lines: Regex,
}

impl HtmlStripper {
    /// Compiles the stripping patterns.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::Regex`] if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let compile = |p: &str| Regex::new(p).map_err(SegmentError::from);
        Ok(Self {
            hidden: compile(r"(?is)<(script|style|noscript|head)\b[^>]*>.*?</(script|style|noscript|head)\s*>|<!--.*?-->")?,
            block: compile(r"(?i)</(p|div|li|h[1-6]|tr|blockquote|section|article)\s*>|<br\s*/?>")?,
            tag: compile(r"<[^>]*>")?,
            spaces: compile(r"[ \t\r\f]+")?,
            blank_lines: compile(r"\n\s*\n+")?,
        })
    }

    /// Returns `true` if the text looks like HTML markup.
    #[must_use]
    pub fn looks_like_html(text: &str) -> bool {
        let head = text.trim_start();
        let head = head[..find_char_boundary(head, 512)].to_ascii_lowercase();
        head.starts_with("<!doctype")
            || head.starts_with("<html")
            || head.contains("<p>")
            || head.contains("<div")
    }

    /// Converts HTML to plain text.
    #[must_use]
    pub fn strip(&self, html: &str) -> String {
        let text = self.hidden.replace_all(html, " ");
        let text = self.block.replace_all(&text, "\n");
        let text = self.tag.replace_all(&text, "");
        let text = decode_entities(&text);
        let text = self.spaces.replace_all(&text, " ");
        let text = self.blank_lines.replace_all(&text, "\n");
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Decodes the handful of entities that show up in article text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&rsquo;", "\u{2019}")
        .replace("&lsquo;", "\u{2018}")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&mdash;", "\u{2014}")
        .replace("&amp;", "&")
}
