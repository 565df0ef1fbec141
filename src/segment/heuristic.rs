//! Heuristic segmentation strategy.
//!
//! Splits sentences on `.`, `!` or `?` followed by whitespace, and words with
//! a regular expression. Cheaper and more predictable than the Unicode rules,
//! at the cost of splitting after abbreviations such as "e.g.".

use crate::error::{Result, SegmentError};
use crate::segment::traits::Segmenter;
use regex::Regex;
use std::ops::Range;

/// Word pattern: runs of letters, digits, or underscores, with inner apostrophes.
const WORD_PATTERN: &str = r"\w+(?:'\w+)*";

/// Punctuation-driven sentence splitter.
///
/// # Examples
///
/// ```
/// use opinion_contexts::segment::{HeuristicSegmenter, Segmenter};
///
/// let segmenter = HeuristicSegmenter::new().unwrap();
/// let sentences = segmenter.segment("It's late. Go home!");
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(sentences[0].tokens, vec!["it's", "late"]);
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicSegmenter {
    word: Regex,
}

impl HeuristicSegmenter {
    /// Creates a new heuristic segmenter.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::Regex`] if the word pattern fails to compile.
    pub fn new() -> Result<Self> {
        let word = Regex::new(WORD_PATTERN).map_err(SegmentError::from)?;
        Ok(Self { word })
    }
}

impl Segmenter for HeuristicSegmenter {
    fn sentences<'a>(&self, text: &'a str) -> Vec<(Range<usize>, &'a str)> {
        let mut sentences = Vec::new();
        let bytes = text.as_bytes();
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if matches!(bytes[i], b'.' | b'!' | b'?')
                && (i + 1 >= bytes.len() || bytes[i + 1].is_ascii_whitespace())
            {
                let end = i + 1;
                if end > start {
                    sentences.push((start..end, &text[start..end]));
                }
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                start = i;
                continue;
            }
            i += 1;
        }

        if start < text.len() {
            sentences.push((start..text.len(), &text[start..]));
        }

        sentences
    }

    fn tokens(&self, sentence: &str) -> Vec<String> {
        self.word
            .find_iter(sentence)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn description(&self) -> &'static str {
        "Split on . ! ? followed by whitespace, regex word tokens"
    }
}
