//! # opinion-contexts
//!
//! Groups a document's sentences into contexts by word overlap, then
//! explores the opinion a context expresses.
//!
//! Each sentence is compared with every later sentence using the Jaccard
//! similarity of their word sets. A sentence absorbs its similar later
//! sentences into one context; a used-set guarantees that every sentence
//! lands in exactly one context.
//!
//! ## Features
//!
//! - **Segmentation**: UAX #29 or punctuation-driven sentence splitting
//! - **Similarity**: forward-only Jaccard graph, parallel for long documents
//! - **Merging**: deterministic seed-order context merge
//! - **Remote** (feature `remote`): Metaphor document source and search,
//!   `OpenAI` opinion extraction
//!
//! ## Example
//!
//! ```
//! use opinion_contexts::{GraphConfig, UnicodeSegmenter, analyze};
//!
//! let analysis = analyze(
//!     "The cat sat. The cat ran. Birds fly south.",
//!     &UnicodeSegmenter::new(),
//!     &GraphConfig::new().with_threshold(0.3),
//! )
//! .unwrap();
//! assert_eq!(analysis.contexts().len(), 2);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod merge;
pub mod opinion;
pub mod pipeline;
pub mod search;
pub mod segment;
pub mod select;
pub mod similarity;
pub mod source;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Context, Sentence};

// Re-export segmentation types
pub use segment::{
    HeuristicSegmenter, Segmenter, UnicodeSegmenter, available_strategies, create_segmenter,
};

// Re-export similarity and merge types
pub use merge::{MergeOutcome, UsedSet, merge_contexts, merge_sentences};
pub use similarity::{
    DEFAULT_THRESHOLD, DegeneratePolicy, GraphConfig, SimilarityGraph, TokenSet, build_graph,
    compute_similarity, jaccard,
};

// Re-export collaborator types
pub use config::RemoteConfig;
pub use opinion::{Opinion, OpinionExtractor};
pub use search::{RelatedContent, RelatedSearch, SearchHit, find_related};
pub use select::{FixedSelection, PromptSelector, SelectionSurface, parse_selection};
pub use source::{DocumentSource, FileSource};

// Re-export pipeline entry points
pub use pipeline::{Analysis, Exploration, analyze, analyze_document, explore};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};

// Re-export remote clients (feature-gated)
#[cfg(feature = "remote")]
pub use opinion::OpenAiExtractor;
#[cfg(feature = "remote")]
pub use search::MetaphorClient;
