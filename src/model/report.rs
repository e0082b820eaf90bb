use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A single factual statement extracted from the input text
pub type Claim = String;

/// Evidence gathered for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Source {
    pub title: String,
    pub summary: String,
    pub link: String,
}

impl Source {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            link: link.into(),
        }
    }
}

// Serialized with the capitalized names the frontend renders verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum VerdictStatus {
    True,
    False,
    Misleading,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictStatus::True => write!(f, "True"),
            VerdictStatus::False => write!(f, "False"),
            VerdictStatus::Misleading => write!(f, "Misleading"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub explanation: String,
}

impl Verdict {
    pub fn new(status: VerdictStatus, explanation: impl Into<String>) -> Self {
        Self {
            status,
            explanation: explanation.into(),
        }
    }
}

/// Coarse credibility tier derived from the aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Badge {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Green => write!(f, "Green"),
            Badge::Yellow => write!(f, "Yellow"),
            Badge::Red => write!(f, "Red"),
        }
    }
}

/// Per-claim record returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClaimResult {
    pub claim: String,
    pub status: VerdictStatus,
    pub explanation: String,
    pub sources: Vec<Source>,
}

/// Top-level response of a verification request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VerificationReport {
    pub claims: Vec<ClaimResult>,
    /// Percentage of claims judged true, 0 when there are no claims
    pub credibility_score: f64,
    pub badge: Badge,
    pub explanation: String,
    /// Set when any stage substituted fallback data for a live response
    #[serde(default)]
    pub degraded: bool,
}
