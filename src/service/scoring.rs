//! Credibility score computation over claim verdicts

use crate::model::{Badge, VerdictStatus};

const GREEN_THRESHOLD: f64 = 70.0;
const YELLOW_THRESHOLD: f64 = 40.0;

/// Percentage of true verdicts and the matching badge; 0 and Red for no verdicts
pub fn score<I>(statuses: I) -> (f64, Badge)
where
    I: IntoIterator<Item = VerdictStatus>,
{
    let (true_count, total) = statuses
        .into_iter()
        .fold((0usize, 0usize), |(true_count, total), status| {
            let is_true = matches!(status, VerdictStatus::True) as usize;
            (true_count + is_true, total + 1)
        });

    let score = if total > 0 {
        true_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    (score, badge_for(score))
}

/// Map a score to its badge tier
pub fn badge_for(score: f64) -> Badge {
    if score >= GREEN_THRESHOLD {
        Badge::Green
    } else if score >= YELLOW_THRESHOLD {
        Badge::Yellow
    } else {
        Badge::Red
    }
}
