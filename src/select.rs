//! Context selection.
//!
//! The exploration step acts on one context chosen by the user. Selection
//! is a trait so the CLI can prompt interactively while tests and scripted
//! runs (`--select N`) pass an index up front.

use crate::error::{CommandError, Result};
use crate::io::preview;
use std::io::{BufRead, Write};
use tracing::debug;

/// Trait for choosing one context out of a list.
pub trait SelectionSurface {
    /// Returns the index of the chosen context.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NothingToSelect`] for an empty list,
    /// [`CommandError::InvalidSelection`] for an unusable choice, or
    /// [`CommandError::Cancelled`] if the user gives up.
    fn select(&mut self, contexts: &[String]) -> Result<usize>;
}

/// Parses a selection against a list of `len` items.
///
/// Accepts a non-negative integer below `len`, ignoring surrounding
/// whitespace.
///
/// # Errors
///
/// Returns [`CommandError::NothingToSelect`] if `len` is zero, and
/// [`CommandError::InvalidSelection`] otherwise when `input` is not an
/// in-range integer.
///
/// # Examples
///
/// ```
/// use opinion_contexts::select::parse_selection;
///
/// assert_eq!(parse_selection(" 2\n", 3).unwrap(), 2);
/// assert!(parse_selection("3", 3).is_err());
/// assert!(parse_selection("-1", 3).is_err());
/// assert!(parse_selection("two", 3).is_err());
/// ```
pub fn parse_selection(input: &str, len: usize) -> Result<usize> {
    if len == 0 {
        return Err(CommandError::NothingToSelect.into());
    }
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(index) if index < len => Ok(index),
        _ => Err(CommandError::InvalidSelection {
            input: trimmed.to_string(),
            max: len - 1,
        }
        .into()),
    }
}

/// Interactive selector that lists contexts and reads the choice.
///
/// Each context is listed in full unless a preview length is set. Invalid
/// input is reported and the prompt repeats. End of input cancels.
#[derive(Debug)]
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
    preview_chars: Option<usize>,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    /// Creates a selector reading from `input` and writing to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            preview_chars: None,
        }
    }

    /// Truncates each listed context to `chars` characters.
    #[must_use]
    pub fn with_preview_chars(mut self, chars: Option<usize>) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Consumes the selector and returns the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn list(&mut self, contexts: &[String]) -> Result<()> {
        for (i, context) in contexts.iter().enumerate() {
            match self.preview_chars {
                Some(chars) => writeln!(self.output, "[{i}] {}", preview(context, chars))?,
                None => writeln!(self.output, "[{i}] {context}\n")?,
            }
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> SelectionSurface for PromptSelector<R, W> {
    fn select(&mut self, contexts: &[String]) -> Result<usize> {
        if contexts.is_empty() {
            return Err(CommandError::NothingToSelect.into());
        }
        self.list(contexts)?;

        let mut line = String::new();
        loop {
            write!(
                self.output,
                "Select a context [0-{}]: ",
                contexts.len() - 1
            )?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(CommandError::Cancelled.into());
            }

            match parse_selection(&line, contexts.len()) {
                Ok(index) => {
                    debug!(index, "context selected");
                    return Ok(index);
                }
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }
}

/// Selection fixed in advance, e.g. from `--select N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSelection(pub usize);

impl SelectionSurface for FixedSelection {
    fn select(&mut self, contexts: &[String]) -> Result<usize> {
        parse_selection(&self.0.to_string(), contexts.len())
    }
}
