//! Analysis pipeline errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, HarmlensErrorCode};
use super::{ConfigError, FusionError, SignalError};

/// Errors that can fail a single content analysis.
///
/// A failed analysis yields no `RiskAssessment` — callers retry or surface
/// the error, never a default score masquerading as a verdict.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Fusion error: {0}")]
    Fusion(#[from] FusionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HarmlensErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Signal(e) => e.error_code(),
            Self::Fusion(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}
