//! LLM-extractable models for structured verdict classification

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::VerdictStatus;

/// LLM-extractable verdict structure
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedVerdict {
    pub status: ExtractedStatus,
    pub explanation: String,
}

/// Verdict categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedStatus {
    True,
    False,
    Misleading,
}

impl From<ExtractedStatus> for VerdictStatus {
    fn from(status: ExtractedStatus) -> Self {
        match status {
            ExtractedStatus::True => VerdictStatus::True,
            ExtractedStatus::False => VerdictStatus::False,
            ExtractedStatus::Misleading => VerdictStatus::Misleading,
        }
    }
}
