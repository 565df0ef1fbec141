//! Sentence similarity.
//!
//! Token-set Jaccard similarity and the upper-triangle similarity graph
//! built from it.

mod graph;
mod jaccard;

pub use graph::{
    DEFAULT_MIN_PARALLEL, DEFAULT_THRESHOLD, DegeneratePolicy, GraphConfig, SimilarityGraph,
    build_graph, compute_similarity,
};
pub use jaccard::{TokenSet, jaccard, try_jaccard};
