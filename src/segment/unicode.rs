//! Unicode segmentation strategy.
//!
//! Uses UAX #29 sentence boundaries and word boundaries from the
//! `unicode-segmentation` crate. Punctuation never becomes a token.

use crate::segment::traits::Segmenter;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Segmenter following the Unicode text segmentation rules.
///
/// Sentences come from UAX #29 sentence bounds; words are the alphanumeric
/// word segments of each sentence, lowercased by default so that "The" and
/// "the" count as the same token.
///
/// # Examples
///
/// ```
/// use opinion_contexts::segment::{Segmenter, UnicodeSegmenter};
///
/// let segmenter = UnicodeSegmenter::new();
/// assert_eq!(segmenter.tokens("Hello, World!"), vec!["hello", "world"]);
///
/// let cased = UnicodeSegmenter::new().lowercase(false);
/// assert_eq!(cased.tokens("Hello, World!"), vec!["Hello", "World"]);
/// ```
#[derive(Debug, Clone)]
pub struct UnicodeSegmenter {
    lowercase: bool,
}

impl Default for UnicodeSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnicodeSegmenter {
    /// Creates a new Unicode segmenter that lowercases tokens.
    #[must_use]
    pub const fn new() -> Self {
        Self { lowercase: true }
    }

    /// Sets whether tokens are lowercased.
    #[must_use]
    pub const fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl Segmenter for UnicodeSegmenter {
    fn sentences<'a>(&self, text: &'a str) -> Vec<(Range<usize>, &'a str)> {
        text.split_sentence_bound_indices()
            .map(|(start, s)| (start..start + s.len(), s))
            .collect()
    }

    fn tokens(&self, sentence: &str) -> Vec<String> {
        sentence
            .unicode_words()
            .map(|w| {
                if self.lowercase {
                    w.to_lowercase()
                } else {
                    w.to_string()
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "unicode"
    }

    fn description(&self) -> &'static str {
        "UAX #29 sentence and word boundaries, lowercased tokens"
    }
}
