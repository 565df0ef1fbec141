//! Similarity graph construction.
//!
//! Compares every sentence with every later sentence and records the pairs
//! whose Jaccard similarity meets the threshold. Only the upper triangle is
//! stored: an edge `i -> j` always has `i < j`.

use crate::core::Sentence;
use crate::error::{Result, SimilarityError};
use crate::similarity::jaccard::{TokenSet, jaccard};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default similarity threshold.
///
/// Low on purpose: sentences sharing a couple of content words are merged.
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Default sentence count at which the scan switches to rayon.
pub const DEFAULT_MIN_PARALLEL: usize = 512;

/// How pairs involving a sentence with no tokens are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Never compare or link a degenerate sentence.
    #[default]
    Skip,
    /// Score any pair with a degenerate sentence as `0.0`.
    Zero,
}

impl FromStr for DegeneratePolicy {
    type Err = SimilarityError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "zero" => Ok(Self::Zero),
            _ => Err(SimilarityError::UnknownPolicy {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Zero => f.write_str("zero"),
        }
    }
}

/// Configuration for building a similarity graph.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Minimum Jaccard similarity for two sentences to be linked.
    pub threshold: f64,
    /// Treatment of sentences with an empty token set.
    pub policy: DegeneratePolicy,
    /// Sentence count at which the outer loop runs in parallel.
    pub min_parallel: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            policy: DegeneratePolicy::default(),
            min_parallel: DEFAULT_MIN_PARALLEL,
        }
    }
}

impl GraphConfig {
    /// Creates a new graph config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the similarity threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the degenerate-sentence policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the parallel cutover. `usize::MAX` keeps the scan sequential.
    #[must_use]
    pub const fn with_min_parallel(mut self, min_parallel: usize) -> Self {
        self.min_parallel = min_parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::InvalidThreshold`] if the threshold is NaN.
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() {
            return Err(SimilarityError::InvalidThreshold {
                value: self.threshold,
            }
            .into());
        }
        Ok(())
    }

    /// Scores one pair, or `None` if the pair is not compared at all.
    fn score(&self, a: &TokenSet, b: &TokenSet) -> Option<f64> {
        if a.is_empty() || b.is_empty() {
            return match self.policy {
                DegeneratePolicy::Skip => None,
                DegeneratePolicy::Zero => Some(0.0),
            };
        }
        Some(jaccard(a, b))
    }
}

/// Upper-triangle similarity relation over sentence indices.
///
/// Maps each sentence index to the ascending list of later indices it is
/// similar to. Sentences with no similar later sentence have no entry.
///
/// # Examples
///
/// ```
/// use opinion_contexts::similarity::{TokenSet, compute_similarity};
///
/// let sets = vec![
///     TokenSet::from_tokens(["the", "cat", "sat"]),
///     TokenSet::from_tokens(["the", "cat", "ran"]),
///     TokenSet::from_tokens(["birds", "fly", "south"]),
/// ];
/// let graph = compute_similarity(&sets, 0.3).unwrap();
/// assert_eq!(graph.neighbors(0), &[1]);
/// assert!(graph.neighbors(1).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimilarityGraph {
    /// Number of sentences the graph was built over.
    len: usize,
    /// Neighbour lists keyed by the lower index.
    neighbors: BTreeMap<usize, Vec<usize>>,
}

impl SimilarityGraph {
    /// Creates an empty relation over `len` sentences.
    #[must_use]
    pub const fn empty(len: usize) -> Self {
        Self {
            len,
            neighbors: BTreeMap::new(),
        }
    }

    /// Builds a relation from explicit neighbour lists.
    ///
    /// Lists are sorted and deduplicated, and any `j <= i` is dropped, so the
    /// upper-triangle invariant holds whatever the input.
    #[must_use]
    pub fn from_neighbors<I>(len: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, Vec<usize>)>,
    {
        let mut neighbors = BTreeMap::new();
        for (i, mut list) in entries {
            list.retain(|&j| j > i);
            list.sort_unstable();
            list.dedup();
            if !list.is_empty() {
                neighbors.insert(i, list);
            }
        }
        Self { len, neighbors }
    }

    /// Returns the number of sentences the relation covers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the relation covers no sentences.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the later sentences similar to sentence `i`.
    #[must_use]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        self.neighbors.get(&i).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if the relation stores the edge `i -> j`.
    #[must_use]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.neighbors(i).binary_search(&j).is_ok()
    }

    /// Returns the total number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.values().map(Vec::len).sum()
    }

    /// Iterates over `(i, neighbours)` entries in ascending `i`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.neighbors.iter().map(|(i, list)| (*i, list.as_slice()))
    }

    /// Builds the relation for already segmented sentences.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_sentences(sentences: &[Sentence], config: &GraphConfig) -> Result<Self> {
        let sets: Vec<TokenSet> = sentences
            .iter()
            .map(|s| TokenSet::from_tokens(s.tokens.iter().map(String::as_str)))
            .collect();
        build_graph(&sets, config)
    }
}

/// Computes the similarity relation with the default degenerate policy.
///
/// # Arguments
///
/// * `sentences` - Token set of each sentence, in document order.
/// * `threshold` - Minimum similarity for an edge.
///
/// # Errors
///
/// Returns [`SimilarityError::InvalidThreshold`] if `threshold` is NaN.
pub fn compute_similarity(sentences: &[TokenSet], threshold: f64) -> Result<SimilarityGraph> {
    build_graph(sentences, &GraphConfig::new().with_threshold(threshold))
}

/// Computes the similarity relation with an explicit configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn build_graph(sentences: &[TokenSet], config: &GraphConfig) -> Result<SimilarityGraph> {
    config.validate()?;

    let n = sentences.len();
    let row = |i: usize| -> (usize, Vec<usize>) {
        let a = &sentences[i];
        let list = (i + 1..n)
            .filter(|&j| {
                config
                    .score(a, &sentences[j])
                    .is_some_and(|s| s >= config.threshold)
            })
            .collect();
        (i, list)
    };

    let rows: Vec<(usize, Vec<usize>)> = if n >= config.min_parallel {
        (0..n).into_par_iter().map(row).collect()
    } else {
        (0..n).map(row).collect()
    };

    let degenerate = sentences.iter().filter(|s| s.is_empty()).count();
    let graph = SimilarityGraph {
        len: n,
        neighbors: rows.into_iter().filter(|(_, l)| !l.is_empty()).collect(),
    };

    debug!(
        sentences = n,
        edges = graph.edge_count(),
        degenerate,
        threshold = config.threshold,
        policy = %config.policy,
        parallel = n >= config.min_parallel,
        "built similarity graph"
    );

    Ok(graph)
}
