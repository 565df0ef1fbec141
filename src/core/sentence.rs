//! Sentence representation.
//!
//! A sentence is one segment of the source document, identified by its
//! position in document order. It keeps its word tokens and the byte span it
//! occupies in the original text.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single sentence of a document.
///
/// # Examples
///
/// ```
/// use opinion_contexts::core::Sentence;
///
/// let sentence = Sentence::new(
///     0,
///     "The cat sat.".to_string(),
///     vec!["the".to_string(), "cat".to_string(), "sat".to_string()],
///     0..12,
/// );
/// assert_eq!(sentence.token_count(), 3);
/// assert!(!sentence.is_degenerate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Zero-based position in document order.
    pub index: usize,

    /// Sentence text, trimmed of surrounding whitespace.
    pub text: String,

    /// Word tokens in order of appearance (duplicates kept).
    pub tokens: Vec<String>,

    /// Byte span in the original document.
    pub span: Range<usize>,
}

impl Sentence {
    /// Creates a new sentence.
    ///
    /// # Arguments
    ///
    /// * `index` - Position in document order.
    /// * `text` - Sentence text.
    /// * `tokens` - Word tokens produced by the segmenter.
    /// * `span` - Byte range in the original document.
    #[must_use]
    pub const fn new(index: usize, text: String, tokens: Vec<String>, span: Range<usize>) -> Self {
        Self {
            index,
            text,
            tokens,
            span,
        }
    }

    /// Returns the number of tokens (duplicates included).
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` when the sentence produced no tokens.
    ///
    /// Degenerate sentences have an empty token set, for which Jaccard
    /// similarity against another empty set is undefined.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the start byte offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    /// Returns the end byte offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.span.end
    }
}
