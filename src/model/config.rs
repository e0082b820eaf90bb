use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "CREDICHECK_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "GOOGLE_API_KEY";
const ENV_SEARCH_ENGINE_ID: &str = "SEARCH_ENGINE_ID";
const ENV_GENERATION_MODEL: &str = "GENERATION_MODEL";
const ENV_SEARCH_BASE_URL: &str = "SEARCH_BASE_URL";
const ENV_CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com";

/// Hard ceiling on sources kept per claim
pub const MAX_SOURCES_PER_CLAIM: usize = 3;

const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Credentials for the external capabilities.
///
/// A missing value disables the matching capability entirely; the pipeline
/// then runs on fallback data for that stage.
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub search_engine_id: Option<String>,
}

impl Credentials {
    pub fn new(api_key: Option<String>, search_engine_id: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            search_engine_id: search_engine_id.filter(|id| !id.trim().is_empty()),
        }
    }

    /// Search needs both the API key and the engine id
    pub fn search_credentials(&self) -> Option<(&str, &str)> {
        Some((self.api_key.as_deref()?, self.search_engine_id.as_deref()?))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("search_engine_id", &self.search_engine_id)
            .finish()
    }
}

/// How a free-text classification response is turned into a status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictMode {
    /// Ordered substring containment over the raw response
    #[default]
    Substring,
    /// Schema-constrained `{status, explanation}` output
    Structured,
}

/// Failure categories of an external capability call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NotConfigured,
    Request,
    Timeout,
    EmptyResponse,
    Malformed,
}

/// What the orchestrator does with a failed capability call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    /// Substitute canned data and mark the report degraded
    #[default]
    Fallback,
    /// Abort the request with an upstream error
    Fail,
}

/// Per-failure-kind fallback decisions.
///
/// Missing credentials always fall back and are not configurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FallbackPolicy {
    #[serde(default)]
    pub request: FallbackAction,
    #[serde(default)]
    pub timeout: FallbackAction,
    #[serde(default)]
    pub empty_response: FallbackAction,
    #[serde(default)]
    pub malformed: FallbackAction,
}

impl FallbackPolicy {
    pub fn action_for(&self, kind: FailureKind) -> FallbackAction {
        match kind {
            FailureKind::NotConfigured => FallbackAction::Fallback,
            FailureKind::Request => self.request,
            FailureKind::Timeout => self.timeout,
            FailureKind::EmptyResponse => self.empty_response,
            FailureKind::Malformed => self.malformed,
        }
    }
}

#[cfg(test)]
impl FallbackPolicy {
    /// Policy that aborts on every failure except missing credentials
    pub fn strict() -> Self {
        Self {
            request: FallbackAction::Fail,
            timeout: FallbackAction::Fail,
            empty_response: FallbackAction::Fail,
            malformed: FallbackAction::Fail,
        }
    }
}

/// Pipeline tuning loaded from the YAML file
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    /// Claims processed at once; 1 keeps processing strictly sequential
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default)]
    pub verdict_mode: VerdictMode,
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

fn default_max_sources() -> usize {
    MAX_SOURCES_PER_CLAIM
}

fn default_call_timeout_secs() -> u64 {
    DEFAULT_CALL_TIMEOUT_SECS
}

fn default_max_concurrency() -> usize {
    1
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_sources: default_max_sources(),
            call_timeout_secs: default_call_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            verdict_mode: VerdictMode::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Source cap clamped to `1..=MAX_SOURCES_PER_CLAIM`
    pub fn source_limit(&self) -> usize {
        self.max_sources.clamp(1, MAX_SOURCES_PER_CLAIM)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs.max(1))
    }

    pub fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

const PIPELINE_KEYS: [&str; 5] = [
    "max_sources",
    "call_timeout_secs",
    "max_concurrency",
    "verdict_mode",
    "fallback",
];

/// Parse config file contents into the pipeline section plus the keys it left unset
fn parse_pipeline(contents: &str) -> Result<(PipelineConfig, Vec<&'static str>), serde_yaml::Error> {
    let raw: serde_yaml::Value = serde_yaml::from_str(contents)?;

    let section = raw.get("pipeline").and_then(serde_yaml::Value::as_mapping);
    let defaulted = PIPELINE_KEYS
        .into_iter()
        .filter(|key| !section.is_some_and(|m| m.contains_key(*key)))
        .collect();

    let file: ConfigFile = serde_yaml::from_value(raw)?;
    Ok((file.pipeline, defaulted))
}

/// Comma-separated origin list; blank entries are dropped
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub pipeline: PipelineConfig,
    pub generation_model: String,
    pub search_base_url: String,
    /// Browser origins allowed to call the API; empty allows any origin
    pub cors_allowed_origins: Vec<String>,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            pipeline: PipelineConfig::default(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            cors_allowed_origins: Vec::new(),
            port: 8000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let credentials = Credentials::new(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_SEARCH_ENGINE_ID).ok(),
        );

        let generation_model = std::env::var(ENV_GENERATION_MODEL)
            .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string());
        let search_base_url = std::env::var(ENV_SEARCH_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_SEARCH_BASE_URL.to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let pipeline = Self::load_pipeline(&config_path);

        let cors_allowed_origins = std::env::var(ENV_CORS_ALLOWED_ORIGINS)
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        Self {
            credentials,
            pipeline,
            generation_model,
            search_base_url,
            cors_allowed_origins,
            port,
            host,
        }
    }

    /// Log which capabilities will run on fallback data
    pub fn report_missing_credentials(&self) {
        if self.credentials.api_key.is_none() {
            tracing::error!("{} is not set or invalid.", ENV_API_KEY);
        }
        if self.credentials.search_engine_id.is_none() {
            tracing::error!("{} is not set or invalid.", ENV_SEARCH_ENGINE_ID);
        }
    }

    /// Read the pipeline section of the YAML file, falling back to defaults
    fn load_pipeline(path: &str) -> PipelineConfig {
        let path = Path::new(path);

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file not found, using default pipeline");
                return PipelineConfig::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using default pipeline");
                return PipelineConfig::default();
            }
        };

        if contents.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using default pipeline");
            return PipelineConfig::default();
        }

        match parse_pipeline(&contents) {
            Ok((pipeline, defaulted)) => {
                if !defaulted.is_empty() {
                    tracing::info!(path = %path.display(), keys = ?defaulted, "Pipeline keys not set, using defaults");
                }
                tracing::info!(
                    path = %path.display(),
                    max_sources = pipeline.source_limit(),
                    call_timeout_secs = pipeline.call_timeout().as_secs(),
                    max_concurrency = pipeline.concurrency(),
                    verdict_mode = ?pipeline.verdict_mode,
                    "Loaded pipeline configuration"
                );
                pipeline
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using default pipeline");
                PipelineConfig::default()
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
