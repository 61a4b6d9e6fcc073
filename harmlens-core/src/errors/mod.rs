//! Error handling for HarmLens.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod escalation_error;
pub mod fusion_error;
pub mod pipeline_error;
pub mod signal_error;

pub use config_error::ConfigError;
pub use error_code::HarmlensErrorCode;
pub use escalation_error::EscalationError;
pub use fusion_error::FusionError;
pub use pipeline_error::PipelineError;
pub use signal_error::SignalError;
