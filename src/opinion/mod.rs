//! Opinion extraction.
//!
//! An extractor turns one context's text into an [`Opinion`]: the subject,
//! the sentiment, the opinion itself, and its opposite. The opposite drives
//! the search for dissenting pages.

pub mod prompt;

#[cfg(feature = "remote")]
pub mod openai;

#[cfg(feature = "remote")]
pub use openai::OpenAiExtractor;
pub use prompt::{EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt};

use crate::error::{ExtractionError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names every extraction result must carry, in report order.
pub const REQUIRED_FIELDS: [&str; 4] = ["subject", "sentiment", "opinion", "opposite_opinion"];

/// Structured summary of the opinion expressed by a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opinion {
    /// What the text is about.
    pub subject: String,
    /// Overall sentiment label, as reported by the extractor.
    pub sentiment: String,
    /// The opinion, stated concisely.
    pub opinion: String,
    /// The opposite of the opinion, stated concisely.
    pub opposite_opinion: String,
}

impl Opinion {
    /// Parses an extraction result.
    ///
    /// Markdown code fences around the JSON are tolerated. Extra fields are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidJson`] if the payload is not a JSON
    /// object, and [`ExtractionError::MissingField`] naming the first
    /// required field that is absent, null, or not a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use opinion_contexts::opinion::Opinion;
    ///
    /// let opinion = Opinion::from_json(
    ///     r#"{"subject": "cats", "sentiment": "positive",
    ///         "opinion": "Cats are great.", "opposite_opinion": "Cats are not great."}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(opinion.subject, "cats");
    ///
    /// let err = Opinion::from_json(r#"{"subject": "cats"}"#).unwrap_err();
    /// assert!(err.to_string().contains("sentiment"));
    /// ```
    pub fn from_json(raw: &str) -> Result<Self> {
        let payload = strip_code_fences(raw);
        if payload.is_empty() {
            return Err(ExtractionError::EmptyResponse.into());
        }

        let value: Value = serde_json::from_str(payload).map_err(ExtractionError::from)?;
        let Value::Object(map) = value else {
            return Err(ExtractionError::InvalidJson(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            ))
            .into());
        };

        Ok(Self {
            subject: required(&map, "subject")?,
            sentiment: required(&map, "sentiment")?,
            opinion: required(&map, "opinion")?,
            opposite_opinion: required(&map, "opposite_opinion")?,
        })
    }
}

/// Trait for turning a context into an [`Opinion`].
pub trait OpinionExtractor {
    /// Extracts the opinion expressed by `context`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if the request fails or the result is
    /// malformed.
    fn extract(&self, context: &str) -> Result<Opinion>;
}

fn required(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    match map.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(ExtractionError::MissingField { field }.into()),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Removes a surrounding ```` ``` ```` or ```` ```json ```` fence, if present.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.find('\n').map_or("", |nl| &rest[nl + 1..]);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
