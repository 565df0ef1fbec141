//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::{DEFAULT_METAPHOR_URL, RemoteConfig};
use crate::error::{InputError, Result};
use crate::segment::DEFAULT_SEGMENTER;
use crate::similarity::{DEFAULT_MIN_PARALLEL, DEFAULT_THRESHOLD, DegeneratePolicy, GraphConfig};
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "remote")]
use crate::config::{DEFAULT_MODEL, DEFAULT_PUBLISHED_AFTER};
#[cfg(feature = "remote")]
use chrono::NaiveDate;

/// Opinion contexts: group a document's sentences by word overlap.
///
/// Splits a document into sentences, links sentences whose Jaccard
/// similarity meets a threshold, and merges each sentence with its similar
/// later sentences into a context.
#[derive(Parser, Debug)]
#[command(name = "opinion-contexts")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// `OpenAI` API key for opinion extraction.
    #[arg(long, env = "OPENAI_API_KEY", global = true, hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Metaphor API key for document contents and search.
    #[arg(long, env = "METAPHOR_API_KEY", global = true, hide_env_values = true)]
    pub metaphor_api_key: Option<String>,

    /// Metaphor API base URL.
    #[arg(long, env = "METAPHOR_API_URL", default_value = DEFAULT_METAPHOR_URL, global = true)]
    pub metaphor_url: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the merged contexts of a document.
    Contexts(DocumentArgs),

    /// Print the similarity graph of a document.
    Graph(DocumentArgs),

    /// Print the sentences of a document with spans and token counts.
    Sentences(DocumentArgs),

    /// Pick a context, extract its opinion, and find pages for and against it.
    #[cfg(feature = "remote")]
    Explore {
        /// Document and analysis options.
        #[command(flatten)]
        document: DocumentArgs,

        /// Context index to explore (prompts interactively if omitted).
        #[arg(long)]
        select: Option<usize>,

        /// Cut each context in the selection list to this many characters.
        #[arg(long, value_name = "CHARS")]
        preview: Option<usize>,

        /// Only search pages published after this date (YYYY-MM-DD).
        #[arg(long, default_value = DEFAULT_PUBLISHED_AFTER)]
        since: NaiveDate,

        /// Chat model used for opinion extraction.
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },
}

/// Arguments shared by every command that analyzes a document.
#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Document identifier (a file path with --local).
    pub document: Option<String>,

    /// Read the document from a local file.
    #[arg(short, long)]
    pub local: bool,

    /// Minimum Jaccard similarity for two sentences to be linked.
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    pub threshold: f64,

    /// Segmentation strategy (unicode, heuristic).
    #[arg(short, long, default_value = DEFAULT_SEGMENTER)]
    pub segmenter: String,

    /// Treatment of sentences without words (skip, zero).
    #[arg(long, default_value = "skip")]
    pub policy: String,

    /// Sentence count at which the similarity scan runs in parallel.
    #[arg(long, default_value_t = DEFAULT_MIN_PARALLEL)]
    pub min_parallel: usize,
}

impl DocumentArgs {
    /// Returns the document identifier, rejecting absent or blank ones.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingDocument`] if no identifier was given.
    pub fn document_id(&self) -> Result<&str> {
        self.document
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InputError::MissingDocument.into())
    }

    /// Builds and validates the graph configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown policy or an invalid threshold.
    pub fn graph_config(&self) -> Result<GraphConfig> {
        let policy: DegeneratePolicy = self.policy.parse()?;
        let config = GraphConfig::new()
            .with_threshold(self.threshold)
            .with_policy(policy)
            .with_min_parallel(self.min_parallel);
        config.validate()?;
        Ok(config)
    }
}

impl Commands {
    /// Returns the document arguments of the command.
    #[must_use]
    pub const fn document_args(&self) -> &DocumentArgs {
        match self {
            Self::Contexts(args) | Self::Graph(args) | Self::Sentences(args) => args,
            #[cfg(feature = "remote")]
            Self::Explore { document, .. } => document,
        }
    }
}

impl Cli {
    /// Resolves the remote collaborator configuration from flags and
    /// environment.
    #[must_use]
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig::new()
            .with_openai_key(self.openai_api_key.clone())
            .with_metaphor_key(self.metaphor_api_key.clone())
            .with_metaphor_url(&self.metaphor_url)
    }
}
