//! Merged sentence contexts.
//!
//! A context is one or more sentences folded into a single text unit because
//! their token sets were similar enough. It is seeded by one sentence and
//! grows by absorbing later neighbours.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One merged output unit.
///
/// Sentence indices are kept in the order they were folded in: the seed
/// first, then absorbed neighbours in ascending order.
///
/// # Examples
///
/// ```
/// use opinion_contexts::core::Context;
///
/// let mut ctx = Context::seeded(0, "the cat sat", 0..11);
/// ctx.absorb(1, "the cat ran", 12..23);
/// assert_eq!(ctx.text, "the cat sat the cat ran");
/// assert_eq!(ctx.indices, vec![0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Sentence indices folded into this context, seed first.
    pub indices: Vec<usize>,

    /// Sentence texts joined with a single space.
    pub text: String,

    /// Byte spans of each folded sentence in the original document.
    pub spans: Vec<Range<usize>>,
}

impl Context {
    /// Starts a new context from its seed sentence.
    #[must_use]
    pub fn seeded(index: usize, text: &str, span: Range<usize>) -> Self {
        Self {
            indices: vec![index],
            text: text.to_string(),
            spans: vec![span],
        }
    }

    /// Appends a neighbour sentence to this context.
    pub fn absorb(&mut self, index: usize, text: &str, span: Range<usize>) {
        self.text.push(' ');
        self.text.push_str(text);
        self.indices.push(index);
        self.spans.push(span);
    }

    /// Returns the index of the sentence that started this context.
    #[must_use]
    pub fn seed(&self) -> usize {
        self.indices.first().copied().unwrap_or_default()
    }

    /// Returns the number of sentences in this context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the context holds no sentences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` if nothing was merged into the seed.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.indices.len() == 1
    }

    /// Returns `true` if the sentence at `index` belongs to this context.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}
