//! Gemini LLM provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use webassist_protocols::error::ProviderError;
use webassist_protocols::provider::{
    CompletionRequest, CompletionResponse, LLMProvider, ModelDefinition,
};
use webassist_protocols::types::{Message, MessageRole, StopReason, Usage};

use crate::client::{DEFAULT_BASE_URL, GeminiClient};
use crate::types::*;

/// Gemini LLM provider.
pub struct GeminiProvider {
    client: GeminiClient,
    models: Vec<ModelDefinition>,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_BASE_URL)
    }

    /// Provider talking to a non-default endpoint.
    pub fn with_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(api_key, base_url),
            models: vec![
                ModelDefinition::new("gemini-2.0-flash", "Gemini 2.0 Flash")
                    .with_context_length(1_000_000),
                ModelDefinition::new("gemini-1.5-pro", "Gemini 1.5 Pro")
                    .with_context_length(2_000_000),
                ModelDefinition::new("gemini-1.5-flash", "Gemini 1.5 Flash")
                    .with_context_length(1_000_000),
            ],
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn convert_messages(&self, messages: &[Message]) -> Vec<Content> {
        messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|msg| Content {
                role: match msg.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                }
                .to_string(),
                parts: vec![Part::text(msg.content.text())],
            })
            .collect()
    }

    /// The request's own system text wins over system messages.
    fn convert_system(&self, request: &CompletionRequest) -> Option<Content> {
        let text = match &request.system {
            Some(system) => system.clone(),
            None => request
                .messages
                .iter()
                .filter(|m| m.role == MessageRole::System)
                .map(|m| m.content.text())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        if text.trim().is_empty() {
            return None;
        }
        Some(Content {
            role: String::new(),
            parts: vec![Part::text(text)],
        })
    }

    fn build_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: self.convert_messages(&request.messages),
            system_instruction: self.convert_system(request),
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                stop_sequences: request.stop.clone(),
            }),
        }
    }

    fn convert_response(
        &self,
        response: GenerateContentResponse,
        model: &str,
    ) -> Result<CompletionResponse, ProviderError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        let stop_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => StopReason::MaxTokens,
            Some("STOP_SEQUENCE") => StopReason::StopSequence,
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => StopReason::Safety,
            _ => StopReason::EndTurn,
        };

        let text = candidate.content.map(|c| c.text()).unwrap_or_default();
        if text.is_empty() {
            if stop_reason == StopReason::Safety {
                warn!("Gemini response blocked by safety filters");
                return Err(ProviderError::ContentFiltered(
                    candidate.finish_reason.unwrap_or_default(),
                ));
            }
            return Err(ProviderError::EmptyResponse);
        }

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: format!("gemini-{}", uuid::Uuid::new_v4()),
            model: model.to_string(),
            message: Message::assistant(text),
            stop_reason,
            usage,
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        debug!("Gemini complete: model={}", request.model);

        let gemini_request = self.build_request(&request);
        let timeout = request.timeout_seconds.map(Duration::from_secs);
        let response = self
            .client
            .generate_content(&request.model, &gemini_request, timeout)
            .await?;
        self.convert_response(response, &request.model)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
