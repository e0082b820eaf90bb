//! Prompts for claim verification

use crate::model::Source;

/// System prompt for structured verdict extraction
pub const VERDICT_SYSTEM_PROMPT: &str = r#"You are a fact-checking analyst. Classify a factual claim against the provided sources.

## Statuses

- "true": the sources support the claim
- "false": the sources contradict the claim
- "misleading": the claim is partially accurate, lacks context, or the sources are inconclusive

## Output Requirements

- Judge only from the claim and the listed sources
- The explanation is one or two direct, factual sentences
- Do not restate the claim verbatim
"#;

/// Build the classification prompt: the claim, then one `title: summary` line per source
pub fn build_verification_prompt(claim: &str, sources: &[Source]) -> String {
    let sources_text = sources
        .iter()
        .map(|s| format!("{}: {}", s.title, s.summary))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze the claim: {claim}\nSources:\n{sources_text}\n\
         Classify as True, False, or Misleading. Provide a short explanation."
    )
}
