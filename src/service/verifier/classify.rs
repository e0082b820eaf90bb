//! Status extraction from free-text classification responses

use crate::model::VerdictStatus;

/// Ordered, case-sensitive containment: "True" wins over "False", anything else is misleading.
///
/// A response that mentions "True" only to negate it ("this is not True") is
/// still classified as true. Structured verdict mode avoids this.
pub fn classify_response(response: &str) -> VerdictStatus {
    if response.contains("True") {
        VerdictStatus::True
    } else if response.contains("False") {
        VerdictStatus::False
    } else {
        VerdictStatus::Misleading
    }
}
