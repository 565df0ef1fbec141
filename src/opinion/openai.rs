//! `OpenAI` chat-completion opinion extractor.

use crate::config::RemoteConfig;
use crate::error::{ExtractionError, Result};
use crate::opinion::{EXTRACTION_SYSTEM_PROMPT, Opinion, OpinionExtractor, build_extraction_prompt};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, ResponseFormat,
};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// Extracts opinions with an `OpenAI` chat model.
///
/// Requests run on a private current-thread runtime, so callers stay
/// synchronous.
pub struct OpenAiExtractor {
    client: Client<OpenAIConfig>,
    model: String,
    runtime: Runtime,
}

impl OpenAiExtractor {
    /// Creates an extractor from the remote configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no `OpenAI` key is set, or an
    /// extraction error if the runtime cannot be started.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let key = config.require_openai_key()?;
        let client = Client::with_config(OpenAIConfig::new().with_api_key(key));
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ExtractionError::Request(format!("runtime error: {e}")))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            runtime,
        })
    }

    /// Returns the chat model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, context: &str) -> Result<CreateChatCompletionRequest> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(EXTRACTION_SYSTEM_PROMPT)
            .build()
            .map_err(request_error)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(build_extraction_prompt(context))
            .build()
            .map_err(request_error)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(request_error)?;
        Ok(request)
    }
}

impl OpinionExtractor for OpenAiExtractor {
    fn extract(&self, context: &str) -> Result<Opinion> {
        let request = self.build_request(context)?;
        info!(model = %self.model, chars = context.len(), "requesting opinion extraction");

        let response = self
            .runtime
            .block_on(self.client.chat().create(request))
            .map_err(request_error)?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ExtractionError::EmptyResponse)?;
        debug!(bytes = content.len(), "extraction response received");

        Opinion::from_json(&content)
    }
}

impl std::fmt::Debug for OpenAiExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiExtractor")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

fn request_error(err: async_openai::error::OpenAIError) -> ExtractionError {
    ExtractionError::Request(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_requires_key() {
        let err = OpenAiExtractor::new(&RemoteConfig::new()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_build_request() {
        let config = RemoteConfig::new()
            .with_openai_key(Some("sk-test".to_string()))
            .with_model("gpt-4o-mini");
        let extractor = OpenAiExtractor::new(&config).unwrap();
        assert_eq!(extractor.model(), "gpt-4o-mini");

        let request = extractor.build_request("Cats are great.").unwrap();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert!(matches!(request.response_format, Some(ResponseFormat::JsonObject)));
    }
}
