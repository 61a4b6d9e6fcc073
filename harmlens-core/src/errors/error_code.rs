//! Stable string codes for every HarmLens error.
//!
//! Codes cross the audit boundary (webhook payloads, mirror records) and
//! must never change once shipped.

/// Trait mapping an error to its stable code.
pub trait HarmlensErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const SIGNAL_ERROR: &str = "HL_SIGNAL_ERROR";
pub const FUSION_ERROR: &str = "HL_FUSION_ERROR";
pub const ESCALATION_ERROR: &str = "HL_ESCALATION_ERROR";
pub const CONFIG_ERROR: &str = "HL_CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "HL_SERIALIZATION_ERROR";
