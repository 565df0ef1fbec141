//! Error types for opinion-contexts operations.
//!
//! This module provides the error hierarchy using `thiserror` for document
//! input, segmentation, similarity, merging, the remote collaborators, and
//! CLI commands.

use thiserror::Error;

/// Result type alias for opinion-contexts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Document input errors (missing identifier, unknown document).
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Sentence segmentation errors.
    #[error("segmentation error: {0}")]
    Segment(#[from] SegmentError),

    /// Similarity graph errors.
    #[error("similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    /// Context merge errors.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// Opinion extraction errors.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Related-content search errors.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Errors raised while obtaining document text.
#[derive(Error, Debug)]
pub enum InputError {
    /// No document identifier was supplied.
    #[error("no document given. Provide a document identifier (or a file path with --local)")]
    MissingDocument,

    /// The document source could not resolve the identifier.
    #[error("document not found: {id}")]
    ContentNotFound {
        /// Identifier that could not be resolved.
        id: String,
    },

    /// The document source failed before it could answer.
    #[error("failed to fetch document {id}: {reason}")]
    Fetch {
        /// Identifier being fetched.
        id: String,
        /// Transport or decoding failure.
        reason: String,
    },
}

/// Errors raised by sentence segmenters.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// Unknown segmentation strategy.
    #[error("unknown segmentation strategy: {name}")]
    UnknownStrategy {
        /// Name of the unknown strategy.
        name: String,
    },

    /// Regex compilation error.
    #[error("regex error: {0}")]
    Regex(String),
}

/// Errors raised while building the similarity graph.
#[derive(Error, Debug)]
pub enum SimilarityError {
    /// The threshold is not a comparable number.
    #[error("invalid similarity threshold: {value}")]
    InvalidThreshold {
        /// The rejected threshold.
        value: f64,
    },

    /// Unknown degenerate-sentence policy name.
    #[error("unknown degenerate-sentence policy: {name} (expected skip or zero)")]
    UnknownPolicy {
        /// Name of the unknown policy.
        name: String,
    },
}

/// Errors raised while merging contexts.
#[derive(Error, Debug)]
pub enum MergeError {
    /// The similarity relation names a sentence that does not exist.
    #[error("sentence index {index} out of range for {len} sentences")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of sentences available.
        len: usize,
    },
}

/// Errors raised by the opinion extractor.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A required field is missing from the extraction result.
    #[error("malformed extraction result: missing field `{field}`")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The extraction result is not a JSON object.
    #[error("malformed extraction result: {0}")]
    InvalidJson(String),

    /// The model returned no content.
    #[error("extractor returned an empty response")]
    EmptyResponse,

    /// The request to the model failed.
    #[error("extraction request failed: {0}")]
    Request(String),
}

/// Errors raised by the related-content search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The HTTP request failed or returned a non-success status.
    #[error("search request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("failed to decode search response: {0}")]
    Decode(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The user selection is not an in-range integer.
    #[error("invalid selection: {input:?} (enter a number from 0 to {max})")]
    InvalidSelection {
        /// The raw input.
        input: String,
        /// Largest valid index.
        max: usize,
    },

    /// There is nothing to select from.
    #[error("no contexts to select from")]
    NothingToSelect,

    /// User cancelled operation.
    #[error("operation cancelled by user")]
    Cancelled,
}

// Implement From traits for standard library errors

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<regex::Error> for SegmentError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.to_string())
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}
