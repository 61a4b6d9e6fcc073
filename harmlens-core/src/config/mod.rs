//! Configuration system for HarmLens.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod escalation_config;
pub mod explain_config;
pub mod fusion_config;
pub mod harmlens_config;

pub use escalation_config::EscalationConfig;
pub use explain_config::ExplainConfig;
pub use fusion_config::{CategoryTrigger, FusionConfig, SignalWeights};
pub use harmlens_config::{CliOverrides, HarmlensConfig};
