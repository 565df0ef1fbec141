//! CLI layer for opinion-contexts.
//!
//! Provides the command-line interface using clap, with commands for
//! printing a document's sentences, similarity graph, and merged contexts,
//! and (with the `remote` feature) exploring the opinion of one context.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, DocumentArgs};
