//! Context merging.
//!
//! Folds each sentence's similar later sentences into it, producing one
//! context per seed. A used-set over sentence indices guarantees that every
//! sentence lands in exactly one context.

use crate::core::{Context, Sentence};
use crate::error::{MergeError, Result};
use crate::similarity::SimilarityGraph;
use serde::Serialize;
use std::ops::Range;
use tracing::debug;

/// Tracks which sentence indices have been folded into a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsedSet {
    used: Vec<bool>,
    count: usize,
}

impl UsedSet {
    /// Creates an empty used-set over `len` sentences.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            used: vec![false; len],
            count: 0,
        }
    }

    /// Marks `index` as used. Returns `false` if it already was.
    ///
    /// Indices past the end are ignored and reported as already used.
    pub fn insert(&mut self, index: usize) -> bool {
        match self.used.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if `index` has been used.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.used.get(index).copied().unwrap_or(false)
    }

    /// Returns the number of used indices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no index has been used.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of indices tracked.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.used.len()
    }

    /// Returns `true` once every tracked index has been used.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count == self.used.len()
    }
}

/// Result of a merge pass: the contexts and the final used-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Contexts in seed order.
    pub contexts: Vec<Context>,
    /// Used-set after the pass; complete when the merge succeeded.
    pub used: UsedSet,
}

impl MergeOutcome {
    /// Returns the context texts in seed order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.contexts.iter().map(|c| c.text.clone()).collect()
    }

    /// Consumes the outcome and returns the context texts.
    #[must_use]
    pub fn into_texts(self) -> Vec<String> {
        self.contexts.into_iter().map(|c| c.text).collect()
    }
}

/// Merges plain sentence strings into context strings.
///
/// # Arguments
///
/// * `similarity` - Upper-triangle relation from the grapher.
/// * `sentences` - Sentence texts in document order.
///
/// # Errors
///
/// Returns [`MergeError::IndexOutOfRange`] if the relation names a sentence
/// past the end of `sentences`.
///
/// # Examples
///
/// ```
/// use opinion_contexts::merge::merge_contexts;
/// use opinion_contexts::similarity::SimilarityGraph;
///
/// let graph = SimilarityGraph::from_neighbors(3, vec![(0, vec![1])]);
/// let contexts =
///     merge_contexts(&graph, &["the cat sat", "the cat ran", "birds fly south"]).unwrap();
/// assert_eq!(contexts, vec!["the cat sat the cat ran", "birds fly south"]);
/// ```
pub fn merge_contexts(similarity: &SimilarityGraph, sentences: &[&str]) -> Result<Vec<String>> {
    // Plain strings carry no source offsets.
    merge_with(similarity, sentences.len(), move |i| sentences[i], |_| 0..0)
        .map(MergeOutcome::into_texts)
}

/// Merges segmented sentences into contexts, keeping indices and spans.
///
/// # Errors
///
/// Returns [`MergeError::IndexOutOfRange`] if the relation names a sentence
/// past the end of `sentences`.
pub fn merge_sentences(
    similarity: &SimilarityGraph,
    sentences: &[Sentence],
) -> Result<MergeOutcome> {
    merge_with(
        similarity,
        sentences.len(),
        move |i| sentences[i].text.as_str(),
        move |i| sentences[i].span.clone(),
    )
}

fn merge_with<'a, T, S>(
    similarity: &SimilarityGraph,
    len: usize,
    text: T,
    span: S,
) -> Result<MergeOutcome>
where
    T: Fn(usize) -> &'a str,
    S: Fn(usize) -> Range<usize>,
{
    check_bounds(similarity, len)?;

    let mut used = UsedSet::new(len);
    let mut contexts = Vec::new();

    for i in 0..len {
        if !used.insert(i) {
            continue;
        }
        let mut context = Context::seeded(i, text(i), span(i));
        for &j in similarity.neighbors(i) {
            if used.insert(j) {
                context.absorb(j, text(j), span(j));
            }
        }
        contexts.push(context);
    }

    debug!(
        sentences = len,
        contexts = contexts.len(),
        merged = contexts.iter().filter(|c| !c.is_singleton()).count(),
        "merged contexts"
    );

    Ok(MergeOutcome { contexts, used })
}

/// Rejects relations that reference sentences that do not exist.
fn check_bounds(similarity: &SimilarityGraph, len: usize) -> Result<()> {
    for (i, list) in similarity.iter() {
        let max = list.last().copied().unwrap_or(i).max(i);
        if max >= len {
            return Err(MergeError::IndexOutOfRange { index: max, len }.into());
        }
    }
    Ok(())
}
