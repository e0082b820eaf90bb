//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use actix_web::web;

use crate::api::health::CapabilityState;
use crate::model::Config;
use crate::service::{GoogleSearchClient, LlmClient, TextGenerator, VerificationService, WebSearch};

/// Application state containing all services and shared resources
///
/// Built once at startup; nothing in here is mutated while serving requests.
pub struct AppState {
    /// Verification pipeline
    pub verification_service: web::Data<VerificationService>,
    /// Capability modes reported by the readiness probe
    pub capabilities: web::Data<CapabilityState>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// Missing or unusable credentials are not fatal: the affected capability
    /// is left out and the pipeline serves fallback data for it.
    pub fn new(config: &Config) -> Self {
        let generator = Self::build_generator(config);
        let search = Self::build_search(config);

        let capabilities = CapabilityState {
            generation: generator.is_some(),
            search: search.is_some(),
        };

        let verification_service =
            VerificationService::from_config(&config.pipeline, generator, search);

        Self {
            verification_service: web::Data::new(verification_service),
            capabilities: web::Data::new(capabilities),
        }
    }

    /// Build the Gemini text generator when an API key is configured
    fn build_generator(config: &Config) -> Option<Arc<dyn TextGenerator>> {
        let api_key = config.credentials.api_key.as_deref()?;

        match LlmClient::new(api_key, &config.generation_model) {
            Ok(client) => {
                tracing::info!(model = %client.model(), "Text generation enabled");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::error!(error = %e, "Invalid GOOGLE_API_KEY, text generation disabled");
                None
            }
        }
    }

    /// Build the web search client when both key and engine id are configured
    fn build_search(config: &Config) -> Option<Arc<dyn WebSearch>> {
        let (api_key, engine_id) = config.credentials.search_credentials()?;

        tracing::info!(base_url = %config.search_base_url, "Web search enabled");

        Some(Arc::new(GoogleSearchClient::new(
            config.search_base_url.as_str(),
            api_key,
            engine_id,
        )))
    }
}
