//! Prompts for claim extraction

/// Build extraction prompt from the submitted text
pub fn build_extraction_prompt(text: &str) -> String {
    format!(
        "Extract the main factual claims from the following text. \
         Return them as a list of concise statements (1-3 sentences each), one per line. \
         Text: {text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = build_extraction_prompt("Cats have nine lives.");
        assert!(prompt.ends_with("Text: Cats have nine lives."));
        assert!(prompt.contains("one per line"));
    }
}
