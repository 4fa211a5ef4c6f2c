//! Plain text generation over an [`LLMProvider`].

use std::sync::Arc;
use std::time::Duration;

use webassist_protocols::{CompletionRequest, LLMProvider, Message, ProviderError};

/// Sampling options for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 2048,
            timeout: Duration::from_secs(30),
        }
    }
}

/// `generate(prompt) -> text` on top of a completion provider.
pub struct TextGenerator {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl TextGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate free text. There is no structured-output guarantee.
    pub async fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        let request = CompletionRequest::new(&self.model, vec![Message::user(prompt)])
            .with_system(system)
            .with_max_tokens(options.max_tokens)
            .with_temperature(options.temperature)
            .with_timeout(options.timeout.as_secs().max(1));

        let response = tokio::time::timeout(options.timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(options.timeout.as_secs()))??;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}
