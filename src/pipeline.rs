//! End-to-end document analysis.
//!
//! `analyze` runs the deterministic core (segment, graph, merge) over a
//! document's text. `explore` takes the finished context list through the
//! selection, extraction and search collaborators. The context list is
//! always complete before anything is selected from it.

use crate::core::{Context, Sentence};
use crate::error::{CommandError, InputError, Result};
use crate::merge::{MergeOutcome, merge_sentences};
use crate::opinion::{Opinion, OpinionExtractor};
use crate::search::{RelatedContent, RelatedSearch, find_related};
use crate::segment::Segmenter;
use crate::select::SelectionSurface;
use crate::similarity::{GraphConfig, SimilarityGraph};
use crate::source::DocumentSource;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// Everything the core computes for one document.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Sentences in document order.
    pub sentences: Vec<Sentence>,
    /// Forward similarity relation over sentence indices.
    pub graph: SimilarityGraph,
    /// Merged contexts and the used-set.
    pub outcome: MergeOutcome,
}

impl Analysis {
    /// Returns the merged contexts.
    #[must_use]
    pub fn contexts(&self) -> &[Context] {
        &self.outcome.contexts
    }

    /// Returns the context texts in seed order.
    #[must_use]
    pub fn context_texts(&self) -> Vec<String> {
        self.outcome.texts()
    }
}

/// Segments `text`, builds its similarity graph, and merges contexts.
///
/// # Errors
///
/// Returns an error if the graph configuration is invalid.
///
/// # Examples
///
/// ```
/// use opinion_contexts::pipeline::analyze;
/// use opinion_contexts::segment::UnicodeSegmenter;
/// use opinion_contexts::similarity::GraphConfig;
///
/// let analysis = analyze(
///     "The cat sat. The cat ran. Birds fly south.",
///     &UnicodeSegmenter::new(),
///     &GraphConfig::new().with_threshold(0.3),
/// )
/// .unwrap();
/// assert_eq!(analysis.context_texts(), vec!["The cat sat. The cat ran.", "Birds fly south."]);
/// ```
pub fn analyze(text: &str, segmenter: &dyn Segmenter, config: &GraphConfig) -> Result<Analysis> {
    let sentences = segmenter.segment(text);
    debug!(
        segmenter = segmenter.name(),
        sentences = sentences.len(),
        "segmented document"
    );

    let graph = SimilarityGraph::from_sentences(&sentences, config)?;
    let outcome = merge_sentences(&graph, &sentences)?;

    info!(
        sentences = sentences.len(),
        edges = graph.edge_count(),
        contexts = outcome.contexts.len(),
        "document analyzed"
    );

    Ok(Analysis {
        sentences,
        graph,
        outcome,
    })
}

/// Fetches a document and analyzes it.
///
/// # Errors
///
/// Returns [`InputError::MissingDocument`] if `id` is absent or blank,
/// [`InputError::ContentNotFound`] if the source cannot resolve it, or any
/// error from [`analyze`].
pub fn analyze_document(
    source: &dyn DocumentSource,
    id: Option<&str>,
    segmenter: &dyn Segmenter,
    config: &GraphConfig,
) -> Result<Analysis> {
    let id = id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InputError::MissingDocument)?;
    config.validate()?;

    info!(source = source.name(), id, "fetching document");
    let text = source.fetch(id)?;
    analyze(&text, segmenter, config)
}

/// Outcome of exploring one context.
#[derive(Debug, Clone, Serialize)]
pub struct Exploration {
    /// Index of the chosen context.
    pub index: usize,
    /// The chosen context.
    pub context: Context,
    /// Opinion extracted from the context.
    pub opinion: Opinion,
    /// Pages for and against the opinion.
    pub related: RelatedContent,
}

/// The collaborators used by [`explore`].
pub struct Collaborators<'a> {
    /// Chooses the context to explore.
    pub selector: &'a mut dyn SelectionSurface,
    /// Extracts the opinion from the chosen context.
    pub extractor: &'a dyn OpinionExtractor,
    /// Finds related pages.
    pub search: &'a dyn RelatedSearch,
}

/// Selects a context, extracts its opinion, and searches for related pages.
///
/// # Errors
///
/// Returns selection, extraction or search errors unchanged.
pub fn explore(
    analysis: &Analysis,
    collaborators: Collaborators<'_>,
    published_after: NaiveDate,
) -> Result<Exploration> {
    let Collaborators {
        selector,
        extractor,
        search,
    } = collaborators;

    let texts = analysis.context_texts();
    let index = selector.select(&texts)?;
    let context = analysis
        .outcome
        .contexts
        .get(index)
        .cloned()
        .ok_or_else(|| CommandError::InvalidSelection {
            input: index.to_string(),
            max: texts.len().saturating_sub(1),
        })?;

    info!(index, sentences = context.len(), "extracting opinion");
    let opinion = extractor.extract(&context.text)?;
    debug!(subject = %opinion.subject, sentiment = %opinion.sentiment, "opinion extracted");

    let related = find_related(search, &opinion, published_after)?;

    Ok(Exploration {
        index,
        context,
        opinion,
        related,
    })
}
