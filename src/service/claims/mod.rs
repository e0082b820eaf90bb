//! Claim extraction service using LLM
//!
//! Turns free text into an ordered list of concise factual statements.

use std::sync::Arc;
use std::time::Duration;

use crate::model::Claim;
use crate::service::capability::{CapabilityError, TextGenerator, with_timeout};
use crate::service::claims::prompts::build_extraction_prompt;

pub mod prompts;

/// Service for extracting claims from submitted text
#[derive(Clone)]
pub struct ClaimExtractor {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl ClaimExtractor {
    /// `None` disables generation; every call then reports `NotConfigured`
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Extract claims in the order the model returned them
    pub async fn extract(&self, text: &str) -> Result<Vec<Claim>, CapabilityError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(CapabilityError::NotConfigured("text generation"))?;

        let prompt = build_extraction_prompt(text);
        let response = with_timeout(self.timeout, generator.generate(&prompt)).await?;

        let claims = split_claims(&response);
        if claims.is_empty() {
            return Err(CapabilityError::EmptyResponse);
        }

        tracing::debug!(claim_count = claims.len(), "Claims extracted");

        Ok(claims)
    }
}

/// One claim per non-blank line, trimmed
fn split_claims(response: &str) -> Vec<Claim> {
    response
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
