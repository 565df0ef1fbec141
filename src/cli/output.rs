//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{Context, Sentence};
use crate::error::Error;
use crate::io::preview;
use crate::pipeline::Exploration;
use crate::search::SearchHit;
use crate::similarity::SimilarityGraph;
use serde::Serialize;
use std::fmt::Write;

/// Characters of a sentence shown next to each graph node.
const GRAPH_PREVIEW_CHARS: usize = 60;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the merged contexts of a document.
#[must_use]
pub fn format_contexts(contexts: &[Context], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_contexts_text(contexts),
        OutputFormat::Json => format_json(&contexts),
    }
}

fn format_contexts_text(contexts: &[Context]) -> String {
    if contexts.is_empty() {
        return "No sentences found.\n".to_string();
    }

    let mut output = String::new();
    for (i, context) in contexts.iter().enumerate() {
        let indices: Vec<String> = context.indices.iter().map(ToString::to_string).collect();
        let _ = writeln!(output, "[{i}] sentences {}", indices.join(", "));
        let _ = writeln!(output, "{}\n", context.text);
    }
    output
}

/// Formats a similarity graph, naming each linked sentence.
#[must_use]
pub fn format_graph(
    graph: &SimilarityGraph,
    sentences: &[Sentence],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_graph_text(graph, sentences),
        OutputFormat::Json => format_json(graph),
    }
}

fn format_graph_text(graph: &SimilarityGraph, sentences: &[Sentence]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Similarity graph: {} sentences, {} edges",
        graph.len(),
        graph.edge_count()
    );

    for (i, list) in graph.iter() {
        let targets: Vec<String> = list.iter().map(ToString::to_string).collect();
        let label = sentences
            .get(i)
            .map_or_else(String::new, |s| preview(&s.text, GRAPH_PREVIEW_CHARS));
        let _ = writeln!(output, "  {i} -> {}  {label}", targets.join(", "));
    }
    output
}

/// Formats segmented sentences.
#[must_use]
pub fn format_sentences(sentences: &[Sentence], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_sentences_text(sentences),
        OutputFormat::Json => format_json(&sentences),
    }
}

fn format_sentences_text(sentences: &[Sentence]) -> String {
    if sentences.is_empty() {
        return "No sentences found.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "{:<6} {:<14} {:<7} Text", "Index", "Span", "Tokens");
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for sentence in sentences {
        let span = format!("{}..{}", sentence.start(), sentence.end());
        let _ = writeln!(
            output,
            "{:<6} {:<14} {:<7} {}",
            sentence.index,
            span,
            sentence.token_count(),
            sentence.text
        );
    }
    output
}

/// Formats the result of exploring a context.
#[must_use]
pub fn format_exploration(exploration: &Exploration, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_exploration_text(exploration),
        OutputFormat::Json => format_json(exploration),
    }
}

fn format_exploration_text(exploration: &Exploration) -> String {
    let opinion = &exploration.opinion;
    let mut output = String::new();
    let _ = writeln!(output, "Context [{}]:", exploration.index);
    let _ = writeln!(output, "  {}\n", exploration.context.text);
    let _ = writeln!(output, "Subject:          {}", opinion.subject);
    let _ = writeln!(output, "Sentiment:        {}", opinion.sentiment);
    let _ = writeln!(output, "Opinion:          {}", opinion.opinion);
    let _ = writeln!(output, "Opposite opinion: {}", opinion.opposite_opinion);

    write_hits(&mut output, "Similar pages", &exploration.related.similar);
    write_hits(&mut output, "Opposing pages", &exploration.related.opposing);
    output
}

fn write_hits(output: &mut String, heading: &str, hits: &[SearchHit]) {
    let _ = writeln!(output, "\n{heading}:");
    if hits.is_empty() {
        output.push_str("  (none)\n");
        return;
    }
    for hit in hits {
        let title = if hit.title.is_empty() {
            "(untitled)"
        } else {
            hit.title.as_str()
        };
        let _ = writeln!(output, "  {title}\n    {}", hit.url);
    }
}

/// Formats an error for display.
///
/// Text errors are the bare message; JSON errors are an object with an
/// `error` message and the error `kind`.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput<'a> {
                error: String,
                kind: &'a str,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
                kind: error_kind(error),
            })
        }
    }
}

const fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::Input(_) => "input",
        Error::Segment(_) => "segment",
        Error::Similarity(_) => "similarity",
        Error::Merge(_) => "merge",
        Error::Extraction(_) => "extraction",
        Error::Search(_) => "search",
        Error::Io(_) => "io",
        Error::Command(_) => "command",
        Error::Config { .. } => "config",
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
