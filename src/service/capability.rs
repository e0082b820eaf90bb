//! External capabilities consumed by the verification pipeline
//!
//! Text generation and web search sit behind async traits so that the
//! pipeline can run against live providers or in-process test doubles.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::model::FailureKind;
use crate::model::verdicts::ExtractedVerdict;

/// Error type for external capability calls
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CapabilityError {
    #[error("Capability not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl CapabilityError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CapabilityError::NotConfigured(_) => FailureKind::NotConfigured,
            CapabilityError::Request(_) => FailureKind::Request,
            CapabilityError::Timeout(_) => FailureKind::Timeout,
            CapabilityError::EmptyResponse => FailureKind::EmptyResponse,
            CapabilityError::Malformed(_) => FailureKind::Malformed,
        }
    }
}

impl From<reqwest::Error> for CapabilityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CapabilityError::Malformed(err.to_string())
        } else {
            CapabilityError::Request(err.to_string())
        }
    }
}

/// A single web search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Free-text generation
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError>;

    /// Classify a claim into a schema-constrained verdict
    async fn extract_verdict(&self, prompt: &str) -> Result<ExtractedVerdict, CapabilityError>;
}

/// Ranked web search
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Search for `query`, returning at most `max_results` hits in ranking order
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CapabilityError>;
}

/// Bound a capability call; an elapsed deadline becomes `CapabilityError::Timeout`
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, CapabilityError>
where
    F: Future<Output = Result<T, CapabilityError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(CapabilityError::Timeout(limit)),
    }
}
