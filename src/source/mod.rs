//! Document sources.
//!
//! A document source resolves an opaque identifier to the prose text of one
//! document. Sources report unknown identifiers as
//! [`InputError::ContentNotFound`](crate::error::InputError::ContentNotFound).

pub mod file;

pub use file::FileSource;

use crate::error::{InputError, Result};
use std::collections::HashMap;

/// Trait for anything that can supply document text by identifier.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use opinion_contexts::source::DocumentSource;
///
/// let mut docs = HashMap::new();
/// docs.insert("doc-1".to_string(), "The cat sat.".to_string());
/// assert_eq!(docs.fetch("doc-1").unwrap(), "The cat sat.");
/// assert!(docs.fetch("doc-2").is_err());
/// ```
pub trait DocumentSource {
    /// Returns the prose text of the document named by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ContentNotFound`] if `id` cannot be resolved,
    /// or a transport error from the underlying source.
    fn fetch(&self, id: &str) -> Result<String>;

    /// Returns the name of the source, for logging.
    fn name(&self) -> &'static str;
}

impl DocumentSource for HashMap<String, String> {
    fn fetch(&self, id: &str) -> Result<String> {
        self.get(id).cloned().ok_or_else(|| {
            InputError::ContentNotFound { id: id.to_string() }.into()
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
