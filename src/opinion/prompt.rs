//! System prompt and message builder for opinion extraction.

use std::fmt::Write;

/// System prompt for the opinion extractor.
///
/// The model is asked for a flat JSON object with exactly the fields that
/// [`Opinion`](super::Opinion) requires.
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are an assistant that can help review the sentiment of a given text. Determine whether or not it contains an opinion and express the opinion concisely. Then, express the opposite of the opinion concisely. Include the subject of the text. Make the output JSON formatted.

## Output Schema

Return a single JSON object with these string fields and nothing else:

{
  "subject": "what the text is about",
  "sentiment": "positive" | "negative" | "neutral" | "mixed",
  "opinion": "the opinion the text expresses, in one sentence",
  "opposite_opinion": "the opposite of that opinion, in one sentence"
}

If the text holds no opinion, say so in "opinion" and still fill every field."#;

/// Builds the user message for one context.
#[must_use]
pub fn build_extraction_prompt(context: &str) -> String {
    let mut prompt = String::with_capacity(context.len() + 32);
    let _ = write!(prompt, "<text>\n{}\n</text>", context.trim());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_extraction_prompt() {
        let prompt = build_extraction_prompt("  Remote work is great.\n");
        assert_eq!(prompt, "<text>\nRemote work is great.\n</text>");
    }

    #[test]
    fn test_prompt_names_every_field() {
        for field in ["subject", "sentiment", "opinion", "opposite_opinion"] {
            assert!(EXTRACTION_SYSTEM_PROMPT.contains(&format!("\"{field}\"")));
        }
    }
}
