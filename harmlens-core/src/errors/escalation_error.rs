//! Escalation state-machine errors.
//!
//! These are always surfaced to the caller — a rejected transition means a
//! workflow bug or a lost race that a human must see.

use super::error_code::{self, HarmlensErrorCode};

/// Errors raised by the escalation lifecycle manager.
#[derive(Debug, thiserror::Error)]
pub enum EscalationError {
    #[error("Escalation {id} not found")]
    NotFound { id: u64 },

    #[error("Invalid transition for escalation {id}: {from} -> {attempted}")]
    InvalidTransition {
        id: u64,
        from: &'static str,
        attempted: &'static str,
    },

    #[error("Unresolved {kind} escalation already exists for content {content_id}")]
    Duplicate { content_id: String, kind: &'static str },

    #[error("Escalation {id} is already resolved")]
    AlreadyResolved { id: u64 },

    #[error("Version conflict on escalation {id}: expected {expected}, found {found}")]
    Conflict { id: u64, expected: u64, found: u64 },
}

impl HarmlensErrorCode for EscalationError {
    fn error_code(&self) -> &'static str {
        error_code::ESCALATION_ERROR
    }
}
