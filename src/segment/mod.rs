//! Sentence and word segmentation.
//!
//! This module provides a trait-based system for turning raw document text
//! into indexed, tokenized sentences. Two strategies are available:
//!
//! - **Unicode**: UAX #29 sentence and word boundaries (default)
//! - **Heuristic**: punctuation-driven sentence splitting with regex words

pub mod heuristic;
pub mod traits;
pub mod unicode;

pub use heuristic::HeuristicSegmenter;
pub use traits::Segmenter;
pub use unicode::UnicodeSegmenter;

/// Name of the default segmentation strategy.
pub const DEFAULT_SEGMENTER: &str = "unicode";

/// Creates the default segmenter (unicode).
#[must_use]
pub const fn default_segmenter() -> UnicodeSegmenter {
    UnicodeSegmenter::new()
}

/// Creates a segmenter by name.
///
/// # Arguments
///
/// * `name` - Strategy name: "unicode" or "heuristic".
///
/// # Errors
///
/// Returns [`crate::error::SegmentError::UnknownStrategy`] if the strategy name is not recognized.
pub fn create_segmenter(name: &str) -> crate::error::Result<Box<dyn Segmenter>> {
    match name.to_lowercase().as_str() {
        "unicode" => Ok(Box::new(UnicodeSegmenter::new())),
        "heuristic" => Ok(Box::new(HeuristicSegmenter::new()?)),
        _ => Err(crate::error::SegmentError::UnknownStrategy {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Lists available segmentation strategy names.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    vec!["unicode", "heuristic"]
}
