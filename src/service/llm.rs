//! Shared LLM client and interaction utilities
//!
//! Wraps the Gemini provider from rig-core behind the `TextGenerator` capability.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;

use crate::model::verdicts::ExtractedVerdict;
use crate::service::capability::{CapabilityError, TextGenerator};
use crate::service::verifier::prompts::VERDICT_SYSTEM_PROMPT;

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: gemini::Client,
    model: String,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key and model name
    pub fn new(api_key: &str, model: impl Into<String>) -> Result<Self, String> {
        let client = gemini::Client::new(api_key)
            .map_err(|e| format!("Failed to create Gemini client: {}", e))?;

        Ok(Self {
            client,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Initiating Gemini API call"
        );

        let agent = self.client.agent(&self.model).temperature(0.0).build();

        match agent.prompt(prompt).await {
            Ok(text) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    response_length = text.len(),
                    "Gemini API call completed successfully"
                );
                if text.trim().is_empty() {
                    return Err(CapabilityError::EmptyResponse);
                }
                Ok(text)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Gemini API call failed"
                );
                Err(CapabilityError::Request(e.to_string()))
            }
        }
    }

    async fn extract_verdict(&self, prompt: &str) -> Result<ExtractedVerdict, CapabilityError> {
        let start_time = std::time::Instant::now();

        let extractor = self
            .client
            .extractor::<ExtractedVerdict>(&self.model)
            .preamble(VERDICT_SYSTEM_PROMPT)
            .build();

        match extractor.extract(prompt).await {
            Ok(verdict) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "Gemini structured verdict extraction completed successfully"
                );
                Ok(verdict)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Gemini structured verdict extraction failed"
                );
                Err(CapabilityError::Malformed(e.to_string()))
            }
        }
    }
}
