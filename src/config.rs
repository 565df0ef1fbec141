//! Remote collaborator configuration.
//!
//! API keys and endpoints are resolved once per run (from CLI flags or the
//! environment) and handed to the collaborators' constructors. Nothing reads
//! the environment after startup, and the configuration is never mutated.

use crate::error::{Error, Result};
use chrono::NaiveDate;

/// Default chat model for opinion extraction.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default Metaphor API base URL.
pub const DEFAULT_METAPHOR_URL: &str = "https://api.metaphor.systems";

/// Default recency cutoff for related-content search (`YYYY-MM-DD`).
pub const DEFAULT_PUBLISHED_AFTER: &str = "2023-06-01";

/// Configuration shared by the remote collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// `OpenAI` API key.
    pub openai_api_key: Option<String>,
    /// Metaphor API key.
    pub metaphor_api_key: Option<String>,
    /// Chat model used for opinion extraction.
    pub model: String,
    /// Metaphor API base URL, without trailing slash.
    pub metaphor_url: String,
    /// Only search results published after this date are requested.
    pub published_after: NaiveDate,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            metaphor_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            metaphor_url: DEFAULT_METAPHOR_URL.to_string(),
            published_after: default_published_after(),
        }
    }
}

impl RemoteConfig {
    /// Creates a configuration with default endpoints and no keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `OpenAI` API key. Blank keys count as missing.
    #[must_use]
    pub fn with_openai_key(mut self, key: Option<String>) -> Self {
        self.openai_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Sets the Metaphor API key. Blank keys count as missing.
    #[must_use]
    pub fn with_metaphor_key(mut self, key: Option<String>) -> Self {
        self.metaphor_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Sets the chat model.
    #[must_use]
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Sets the Metaphor base URL.
    #[must_use]
    pub fn with_metaphor_url(mut self, url: &str) -> Self {
        self.metaphor_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the search recency cutoff.
    #[must_use]
    pub const fn with_published_after(mut self, date: NaiveDate) -> Self {
        self.published_after = date;
        self
    }

    /// Returns the `OpenAI` key or a configuration error.
    pub fn require_openai_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| missing_key("OPENAI_API_KEY", "--openai-api-key"))
    }

    /// Returns the Metaphor key or a configuration error.
    pub fn require_metaphor_key(&self) -> Result<&str> {
        self.metaphor_api_key
            .as_deref()
            .ok_or_else(|| missing_key("METAPHOR_API_KEY", "--metaphor-api-key"))
    }
}

/// Returns the default recency cutoff date.
#[must_use]
pub fn default_published_after() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap_or(NaiveDate::MIN)
}

fn missing_key(env: &str, flag: &str) -> Error {
    Error::Config {
        message: format!("{env} is not set (or pass {flag})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RemoteConfig::new();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.metaphor_url, DEFAULT_METAPHOR_URL);
        assert_eq!(
            config.published_after.to_string(),
            DEFAULT_PUBLISHED_AFTER
        );
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let config = RemoteConfig::new()
            .with_openai_key(Some("sk-test".to_string()))
            .with_metaphor_key(Some("mk-test".to_string()))
            .with_model("gpt-4o-mini")
            .with_metaphor_url("http://localhost:8080/")
            .with_published_after(date);
        assert_eq!(config.require_openai_key().unwrap(), "sk-test");
        assert_eq!(config.require_metaphor_key().unwrap(), "mk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.metaphor_url, "http://localhost:8080");
        assert_eq!(config.published_after, date);
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = RemoteConfig::new().with_openai_key(Some("   ".to_string()));
        let err = config.require_openai_key().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_missing_metaphor_key() {
        let err = RemoteConfig::new().require_metaphor_key().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("--metaphor-api-key"));
    }
}
