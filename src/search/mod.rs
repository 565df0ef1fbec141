//! Related-content search.
//!
//! Given an extracted [`Opinion`], finds published pages that argue the same
//! opinion and pages that argue its opposite. The two result lists are kept
//! apart.

#[cfg(feature = "remote")]
pub mod metaphor;

#[cfg(feature = "remote")]
pub use metaphor::MetaphorClient;

use crate::error::Result;
use crate::opinion::Opinion;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page title (empty when the index has none).
    pub title: String,
    /// Page URL.
    pub url: String,
}

impl SearchHit {
    /// Creates a search hit.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Trait for search backends that find pages related to a query.
pub trait RelatedSearch {
    /// Searches for pages matching `query` published after `published_after`.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`](crate::error::SearchError) if the request
    /// fails or the response cannot be decoded.
    fn search(&self, query: &str, published_after: NaiveDate) -> Result<Vec<SearchHit>>;
}

/// Pages related to an opinion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedContent {
    /// Pages matching the opinion.
    pub similar: Vec<SearchHit>,
    /// Pages matching the opposite opinion.
    pub opposing: Vec<SearchHit>,
}

impl RelatedContent {
    /// Returns `true` if neither search found anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.similar.is_empty() && self.opposing.is_empty()
    }
}

/// Runs one search for the opinion and one for its opposite.
///
/// # Errors
///
/// Returns the first search error encountered.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use opinion_contexts::opinion::Opinion;
/// use opinion_contexts::search::{RelatedSearch, SearchHit, find_related};
///
/// struct Echo;
///
/// impl RelatedSearch for Echo {
///     fn search(&self, query: &str, _: NaiveDate) -> opinion_contexts::Result<Vec<SearchHit>> {
///         Ok(vec![SearchHit::new(query, "https://example.com")])
///     }
/// }
///
/// let opinion = Opinion {
///     subject: "cats".into(),
///     sentiment: "positive".into(),
///     opinion: "Cats are great.".into(),
///     opposite_opinion: "Cats are not great.".into(),
/// };
/// let since = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
/// let related = find_related(&Echo, &opinion, since).unwrap();
/// assert_eq!(related.similar[0].title, "Cats are great.");
/// assert_eq!(related.opposing[0].title, "Cats are not great.");
/// ```
pub fn find_related<S: RelatedSearch + ?Sized>(
    search: &S,
    opinion: &Opinion,
    published_after: NaiveDate,
) -> Result<RelatedContent> {
    let similar = search.search(&opinion.opinion, published_after)?;
    let opposing = search.search(&opinion.opposite_opinion, published_after)?;

    debug!(
        similar = similar.len(),
        opposing = opposing.len(),
        since = %published_after,
        "related content found"
    );

    Ok(RelatedContent { similar, opposing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use std::cell::RefCell;

    /// Records queries and returns one hit per query.
    #[derive(Default)]
    struct Recorder {
        queries: RefCell<Vec<(String, NaiveDate)>>,
    }

    impl RelatedSearch for Recorder {
        fn search(&self, query: &str, published_after: NaiveDate) -> Result<Vec<SearchHit>> {
            self.queries
                .borrow_mut()
                .push((query.to_string(), published_after));
            Ok(vec![SearchHit::new(
                format!("about {query}"),
                format!("https://example.com/{}", self.queries.borrow().len()),
            )])
        }
    }

    struct Failing;

    impl RelatedSearch for Failing {
        fn search(&self, _: &str, _: NaiveDate) -> Result<Vec<SearchHit>> {
            Err(SearchError::Request("503 Service Unavailable".to_string()).into())
        }
    }

    fn opinion() -> Opinion {
        Opinion {
            subject: "remote work".to_string(),
            sentiment: "positive".to_string(),
            opinion: "Remote work is productive.".to_string(),
            opposite_opinion: "Remote work is unproductive.".to_string(),
        }
    }

    fn since() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    #[test]
    fn test_find_related_queries_both_opinions() {
        let search = Recorder::default();
        let related = find_related(&search, &opinion(), since()).unwrap();

        let queries = search.queries.borrow();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].0, "Remote work is productive.");
        assert_eq!(queries[1].0, "Remote work is unproductive.");
        assert!(queries.iter().all(|(_, d)| *d == since()));

        assert_eq!(related.similar[0].title, "about Remote work is productive.");
        assert_eq!(related.opposing[0].title, "about Remote work is unproductive.");
        assert_ne!(related.similar, related.opposing);
    }

    #[test]
    fn test_find_related_propagates_errors() {
        let err = find_related(&Failing, &opinion(), since()).unwrap_err();
        assert!(matches!(err, crate::Error::Search(SearchError::Request(_))));
    }

    #[test]
    fn test_related_content_is_empty() {
        assert!(RelatedContent::default().is_empty());
        let related = RelatedContent {
            similar: vec![SearchHit::new("t", "u")],
            opposing: vec![],
        };
        assert!(!related.is_empty());
    }
}
