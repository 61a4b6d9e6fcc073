//! Signal normalization errors.

use super::error_code::{self, HarmlensErrorCode};

/// Errors raised at the detector boundary.
///
/// Detectors are untrusted collaborators; everything malformed is rejected
/// here so the fusion engine never sees it.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Unknown signal name: {name}")]
    UnknownSignal { name: String },

    #[error("Signal {name} produced a non-finite score")]
    NonFiniteScore { name: String },
}

impl HarmlensErrorCode for SignalError {
    fn error_code(&self) -> &'static str {
        error_code::SIGNAL_ERROR
    }
}
