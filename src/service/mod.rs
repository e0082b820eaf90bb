pub mod capability;
pub mod claims;
pub mod fallback;
pub mod llm;
pub mod scoring;
pub mod search;
pub mod sources;
pub mod verification;
pub mod verifier;

#[cfg(test)]
pub mod testing;

pub use capability::{TextGenerator, WebSearch};
pub use llm::LlmClient;
pub use search::GoogleSearchClient;
pub use verification::VerificationService;
