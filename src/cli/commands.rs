//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{OutputFormat, format_contexts, format_graph, format_sentences};
use crate::cli::parser::{Cli, Commands, DocumentArgs};
use crate::error::Result;
use crate::pipeline::{Analysis, analyze_document};
use crate::segment::create_segmenter;
use crate::source::{DocumentSource, FileSource};
use tracing::debug;

#[cfg(feature = "remote")]
use crate::cli::output::format_exploration;
#[cfg(feature = "remote")]
use crate::config::RemoteConfig;
#[cfg(feature = "remote")]
use crate::opinion::OpenAiExtractor;
#[cfg(feature = "remote")]
use crate::pipeline::{Collaborators, explore};
#[cfg(feature = "remote")]
use crate::search::MetaphorClient;
#[cfg(feature = "remote")]
use crate::select::{FixedSelection, PromptSelector, SelectionSurface};
#[cfg(feature = "remote")]
use chrono::NaiveDate;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Contexts(args) => cmd_contexts(cli, args, format),
        Commands::Graph(args) => cmd_graph(cli, args, format),
        Commands::Sentences(args) => cmd_sentences(cli, args, format),
        #[cfg(feature = "remote")]
        Commands::Explore {
            document,
            select,
            preview,
            since,
            model,
        } => cmd_explore(cli, document, *select, *preview, *since, model, format),
    }
}

/// Opens the document source the arguments ask for.
fn open_source(cli: &Cli, args: &DocumentArgs) -> Result<Box<dyn DocumentSource>> {
    if args.local {
        return Ok(Box::new(FileSource::new()?));
    }
    remote_source(cli)
}

#[cfg(feature = "remote")]
fn remote_source(cli: &Cli) -> Result<Box<dyn DocumentSource>> {
    Ok(Box::new(MetaphorClient::new(&cli.remote_config())?))
}

#[cfg(not(feature = "remote"))]
fn remote_source(_cli: &Cli) -> Result<Box<dyn DocumentSource>> {
    Err(crate::Error::Config {
        message: "remote documents need the `remote` feature; pass --local to read a file"
            .to_string(),
    })
}

/// Fetches and analyzes the document named by the arguments.
fn load(cli: &Cli, args: &DocumentArgs) -> Result<Analysis> {
    let id = args.document_id()?;
    let segmenter = create_segmenter(&args.segmenter)?;
    let config = args.graph_config()?;
    let source = open_source(cli, args)?;
    debug!(
        source = source.name(),
        segmenter = segmenter.name(),
        threshold = config.threshold,
        "loading document"
    );
    analyze_document(source.as_ref(), Some(id), segmenter.as_ref(), &config)
}

fn cmd_contexts(cli: &Cli, args: &DocumentArgs, format: OutputFormat) -> Result<String> {
    let analysis = load(cli, args)?;
    Ok(format_contexts(analysis.contexts(), format))
}

fn cmd_graph(cli: &Cli, args: &DocumentArgs, format: OutputFormat) -> Result<String> {
    let analysis = load(cli, args)?;
    Ok(format_graph(&analysis.graph, &analysis.sentences, format))
}

fn cmd_sentences(cli: &Cli, args: &DocumentArgs, format: OutputFormat) -> Result<String> {
    let analysis = load(cli, args)?;
    Ok(format_sentences(&analysis.sentences, format))
}

#[cfg(feature = "remote")]
fn cmd_explore(
    cli: &Cli,
    args: &DocumentArgs,
    select: Option<usize>,
    preview: Option<usize>,
    since: NaiveDate,
    model: &str,
    format: OutputFormat,
) -> Result<String> {
    let config = explore_config(cli, since, model);

    // Fail on missing keys before any document work.
    let extractor = OpenAiExtractor::new(&config)?;
    let search = MetaphorClient::new(&config)?;
    let analysis = load(cli, args)?;

    let mut fixed;
    let mut prompt;
    let selector: &mut dyn SelectionSurface = if let Some(index) = select {
        fixed = FixedSelection(index);
        &mut fixed
    } else {
        prompt = PromptSelector::new(std::io::stdin().lock(), std::io::stderr())
            .with_preview_chars(preview);
        &mut prompt
    };

    let exploration = explore(
        &analysis,
        Collaborators {
            selector,
            extractor: &extractor,
            search: &search,
        },
        config.published_after,
    )?;
    Ok(format_exploration(&exploration, format))
}

#[cfg(feature = "remote")]
fn explore_config(cli: &Cli, since: NaiveDate, model: &str) -> RemoteConfig {
    cli.remote_config()
        .with_model(model)
        .with_published_after(since)
}
