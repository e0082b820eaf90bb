pub mod config;
pub mod report;
pub mod verdicts;

pub use config::{
    Config, Credentials, FailureKind, FallbackAction, FallbackPolicy, PipelineConfig, VerdictMode,
};
pub use report::*;
