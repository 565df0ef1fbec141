//! Token sets and Jaccard similarity.
//!
//! Similarity is computed over the *distinct* tokens of each sentence;
//! repeated words inside one sentence do not change the score.

use serde::Serialize;
use std::collections::HashSet;

/// The set of distinct tokens of one sentence.
///
/// # Examples
///
/// ```
/// use opinion_contexts::similarity::TokenSet;
///
/// let set = TokenSet::from_tokens(["the", "cat", "the"]);
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("cat"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenSet(HashSet<String>);

impl TokenSet {
    /// Builds a token set, discarding duplicates.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the set contains `token`.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Counts tokens present in both sets.
    #[must_use]
    pub fn intersection_len(&self, other: &Self) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.0.iter().filter(|t| large.0.contains(*t)).count()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

/// Computes Jaccard similarity, or `None` when both sets are empty.
///
/// `|A ∩ B| / |A ∪ B|`. The union is empty only when both inputs are
/// empty, in which case the ratio is undefined.
///
/// # Examples
///
/// ```
/// use opinion_contexts::similarity::{TokenSet, try_jaccard};
///
/// let a = TokenSet::from_tokens(["the", "cat", "sat"]);
/// let b = TokenSet::from_tokens(["the", "cat", "ran"]);
/// assert_eq!(try_jaccard(&a, &b), Some(0.5));
/// assert_eq!(try_jaccard(&TokenSet::default(), &TokenSet::default()), None);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn try_jaccard(a: &TokenSet, b: &TokenSet) -> Option<f64> {
    let intersection = a.intersection_len(b);
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return None;
    }
    Some(intersection as f64 / union as f64)
}

/// Computes Jaccard similarity, defining the empty/empty case as `0.0`.
#[must_use]
pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f64 {
    try_jaccard(a, b).unwrap_or(0.0)
}
