//! Risk fusion errors.

use super::error_code::{self, HarmlensErrorCode};

/// Errors that can occur while fusing signals into a risk score.
#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    /// A required signal was absent at fusion time. Policy: reject, never
    /// substitute a default — a partial score must not look like a verdict.
    #[error("Missing required signal: {name}")]
    MissingSignal { name: String },

    #[error("Signal weights sum to {sum}, expected 1.0")]
    InvalidWeights { sum: f64 },
}

impl HarmlensErrorCode for FusionError {
    fn error_code(&self) -> &'static str {
        error_code::FUSION_ERROR
    }
}
