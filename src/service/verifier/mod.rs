//! Claim verification service using LLM
//!
//! Classifies a claim as True, False or Misleading against its sources.

use std::sync::Arc;
use std::time::Duration;

use crate::model::{Source, Verdict, VerdictMode};
use crate::service::capability::{CapabilityError, TextGenerator, with_timeout};
use crate::service::verifier::classify::classify_response;
use crate::service::verifier::prompts::build_verification_prompt;

pub mod classify;
pub mod prompts;

/// Service for classifying one claim against its sources
#[derive(Clone)]
pub struct ClaimVerifier {
    generator: Option<Arc<dyn TextGenerator>>,
    mode: VerdictMode,
    timeout: Duration,
}

impl ClaimVerifier {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        mode: VerdictMode,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            mode,
            timeout,
        }
    }

    pub async fn verify(&self, claim: &str, sources: &[Source]) -> Result<Verdict, CapabilityError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(CapabilityError::NotConfigured("text generation"))?;

        let prompt = build_verification_prompt(claim, sources);

        let verdict = match self.mode {
            VerdictMode::Substring => {
                let response = with_timeout(self.timeout, generator.generate(&prompt)).await?;
                let explanation = response.trim().to_string();
                Verdict::new(classify_response(&explanation), explanation)
            }
            VerdictMode::Structured => {
                let extracted =
                    with_timeout(self.timeout, generator.extract_verdict(&prompt)).await?;
                Verdict::new(extracted.status.into(), extracted.explanation.trim())
            }
        };

        tracing::debug!(
            status = %verdict.status,
            mode = ?self.mode,
            source_count = sources.len(),
            "Claim verified"
        );

        Ok(verdict)
    }
}
