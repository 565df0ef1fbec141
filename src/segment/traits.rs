//! Segmenter trait definition.
//!
//! Defines the interface for sentence and word segmentation, enabling
//! pluggable tokenization approaches.

use crate::core::Sentence;
use std::ops::Range;

/// Trait for splitting a document into sentences and sentences into words.
///
/// Implementations must be `Send + Sync` so a single segmenter can serve
/// parallel tokenization. Sentence order must be stable: the same text always
/// yields the same sentences in the same order.
///
/// # Examples
///
/// ```
/// use opinion_contexts::segment::{Segmenter, UnicodeSegmenter};
///
/// let segmenter = UnicodeSegmenter::new();
/// let sentences = segmenter.segment("The cat sat. The cat ran.");
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(sentences[1].tokens, vec!["the", "cat", "ran"]);
/// ```
pub trait Segmenter: Send + Sync {
    /// Splits text into raw sentence slices with their byte ranges.
    ///
    /// Slices may carry surrounding whitespace; [`Segmenter::segment`]
    /// trims it.
    fn sentences<'a>(&self, text: &'a str) -> Vec<(Range<usize>, &'a str)>;

    /// Splits one sentence into word tokens.
    fn tokens(&self, sentence: &str) -> Vec<String>;

    /// Returns the name of the segmentation strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the segmentation strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Segments a document into indexed, tokenized sentences.
    ///
    /// Whitespace-only slices are dropped. Indices are assigned densely in
    /// document order after dropping, so they always run `0..n`.
    fn segment(&self, text: &str) -> Vec<Sentence> {
        let mut out = Vec::new();
        for (range, raw) in self.sentences(text) {
            let trimmed_start = raw.len() - raw.trim_start().len();
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let start = range.start + trimmed_start;
            let span = start..start + trimmed.len();
            let tokens = self.tokens(trimmed);
            out.push(Sentence::new(out.len(), trimmed.to_string(), tokens, span));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on newlines and whitespace; uses all default trait methods.
    struct LineSegmenter;

    impl Segmenter for LineSegmenter {
        fn sentences<'a>(&self, text: &'a str) -> Vec<(Range<usize>, &'a str)> {
            let mut offset = 0;
            let mut out = Vec::new();
            for line in text.split('\n') {
                out.push((offset..offset + line.len(), line));
                offset += line.len() + 1;
            }
            out
        }

        fn tokens(&self, sentence: &str) -> Vec<String> {
            sentence.split_whitespace().map(String::from).collect()
        }

        fn name(&self) -> &'static str {
            "line"
        }
    }

    #[test]
    fn test_default_description() {
        assert_eq!(LineSegmenter.description(), "No description available");
    }

    #[test]
    fn test_segment_trims_and_reindexes() {
        let text = "  first line \n\n   \nsecond";
        let sentences = LineSegmenter.segment(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].index, 0);
        assert_eq!(sentences[0].text, "first line");
        assert_eq!(&text[sentences[0].span.clone()], "first line");
        assert_eq!(sentences[1].index, 1);
        assert_eq!(sentences[1].text, "second");
        assert_eq!(&text[sentences[1].span.clone()], "second");
    }

    #[test]
    fn test_segment_empty_text() {
        assert!(LineSegmenter.segment("").is_empty());
    }
}
