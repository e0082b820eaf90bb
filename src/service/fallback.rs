//! Canned data substituted when a capability is unavailable or fails

use crate::model::{Claim, Source, Verdict, VerdictStatus};

pub const FALLBACK_EXPLANATION: &str = "This claim is supported by scientific evidence.";

pub fn claims() -> Vec<Claim> {
    vec![
        "The Earth is round.".to_string(),
        "Water boils at 100°C at sea level.".to_string(),
    ]
}

pub fn sources() -> Vec<Source> {
    vec![
        Source::new(
            "Wikipedia - Earth",
            "The Earth is an oblate spheroid.",
            "https://en.wikipedia.org/wiki/Earth",
        ),
        Source::new(
            "Science Source",
            "Scientific evidence for Earth's shape.",
            "https://example.com",
        ),
    ]
}

pub fn verdict() -> Verdict {
    Verdict::new(VerdictStatus::True, FALLBACK_EXPLANATION)
}
