//! Verification pipeline orchestration
//!
//! Runs extract → retrieve → verify → score for one request and decides,
//! per failure kind, whether a failed capability call is replaced with
//! fallback data or aborts the request.

use std::fmt;
use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};

use crate::model::{
    ClaimResult, FailureKind, FallbackAction, FallbackPolicy, PipelineConfig, VerificationReport,
};
use crate::service::capability::{CapabilityError, TextGenerator, WebSearch};
use crate::service::claims::ClaimExtractor;
use crate::service::fallback;
use crate::service::scoring;
use crate::service::sources::SourceRetriever;
use crate::service::verifier::ClaimVerifier;

/// Pipeline stage that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extraction,
    Retrieval,
    Verification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extraction => write!(f, "claim extraction"),
            Stage::Retrieval => write!(f, "source retrieval"),
            Stage::Verification => write!(f, "claim verification"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VerificationError {
    #[error("{stage} failed: {source}")]
    Upstream {
        stage: Stage,
        source: CapabilityError,
    },
}

/// A stage output and whether it came from fallback data
struct Resolved<T> {
    value: T,
    degraded: bool,
}

/// Service composing extraction, retrieval, verification and scoring
pub struct VerificationService {
    extractor: ClaimExtractor,
    retriever: SourceRetriever,
    verifier: ClaimVerifier,
    policy: FallbackPolicy,
    concurrency: usize,
}

impl VerificationService {
    pub fn new(
        extractor: ClaimExtractor,
        retriever: SourceRetriever,
        verifier: ClaimVerifier,
        policy: FallbackPolicy,
        concurrency: usize,
    ) -> Self {
        Self {
            extractor,
            retriever,
            verifier,
            policy,
            concurrency: concurrency.max(1),
        }
    }

    /// Build the pipeline from configuration; a `None` capability runs that stage on fallback data
    pub fn from_config(
        config: &PipelineConfig,
        generator: Option<Arc<dyn TextGenerator>>,
        search: Option<Arc<dyn WebSearch>>,
    ) -> Self {
        let timeout = config.call_timeout();

        tracing::info!(
            generation = generator.is_some(),
            search = search.is_some(),
            verdict_mode = ?config.verdict_mode,
            max_sources = config.source_limit(),
            max_concurrency = config.concurrency(),
            timeout_secs = timeout.as_secs(),
            "Verification service initialized"
        );

        Self::new(
            ClaimExtractor::new(generator.clone(), timeout),
            SourceRetriever::new(search, config.source_limit(), timeout),
            ClaimVerifier::new(generator, config.verdict_mode, timeout),
            config.fallback,
            config.concurrency(),
        )
    }

    /// Verify every claim found in `text` and aggregate a credibility report.
    ///
    /// Claims keep extraction order regardless of concurrency. With the default
    /// policy this never fails; an error is only returned when the policy says
    /// to abort on a given failure kind.
    pub async fn process(&self, text: &str) -> Result<VerificationReport, VerificationError> {
        let start_time = std::time::Instant::now();

        let claims = self.resolve(
            Stage::Extraction,
            self.extractor.extract(text).await,
            fallback::claims,
        )?;
        let mut degraded = claims.degraded;
        let claims = claims.value;

        let checked: Vec<Resolved<ClaimResult>> = stream::iter(claims.iter())
            .map(|claim| self.check_claim(claim))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let mut results = Vec::with_capacity(checked.len());
        for outcome in checked {
            degraded |= outcome.degraded;
            results.push(outcome.value);
        }

        let (credibility_score, badge) = scoring::score(results.iter().map(|r| r.status));

        tracing::info!(
            claim_count = results.len(),
            credibility_score = credibility_score,
            badge = %badge,
            degraded = degraded,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Verification complete"
        );

        Ok(VerificationReport {
            explanation: format!("Overall credibility based on {} claims.", claims.len()),
            claims: results,
            credibility_score,
            badge,
            degraded,
        })
    }

    /// Retrieve sources then verify a single claim
    async fn check_claim(&self, claim: &str) -> Result<Resolved<ClaimResult>, VerificationError> {
        let sources = self.resolve(
            Stage::Retrieval,
            self.retriever.retrieve(claim).await,
            fallback::sources,
        )?;

        let verdict = self.resolve(
            Stage::Verification,
            self.verifier.verify(claim, &sources.value).await,
            fallback::verdict,
        )?;

        Ok(Resolved {
            degraded: sources.degraded || verdict.degraded,
            value: ClaimResult {
                claim: claim.to_string(),
                status: verdict.value.status,
                explanation: verdict.value.explanation,
                sources: sources.value,
            },
        })
    }

    /// Apply the fallback policy to a stage result
    fn resolve<T>(
        &self,
        stage: Stage,
        result: Result<T, CapabilityError>,
        fallback: impl FnOnce() -> T,
    ) -> Result<Resolved<T>, VerificationError> {
        let err = match result {
            Ok(value) => {
                return Ok(Resolved {
                    value,
                    degraded: false,
                });
            }
            Err(e) => e,
        };

        let kind = err.kind();
        match self.policy.action_for(kind) {
            FallbackAction::Fallback => {
                if kind == FailureKind::NotConfigured {
                    tracing::debug!(stage = %stage, error = %err, "Using fallback data");
                } else {
                    tracing::warn!(stage = %stage, error = %err, "Capability call failed, using fallback data");
                }
                Ok(Resolved {
                    value: fallback(),
                    degraded: true,
                })
            }
            FallbackAction::Fail => {
                tracing::error!(stage = %stage, error = %err, "Capability call failed, aborting request");
                Err(VerificationError::Upstream { stage, source: err })
            }
        }
    }
}
