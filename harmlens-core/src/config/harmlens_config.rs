//! Top-level HarmLens configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EscalationConfig, ExplainConfig, FusionConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`HARMLENS_*`)
/// 3. Project config (`harmlens.toml` in project root)
/// 4. User config (`~/.harmlens/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmlensConfig {
    /// Version of the weight/threshold/category-trigger tables. Bumped on
    /// every tuning change so persisted assessments can name the tables
    /// that produced them.
    pub version: u32,
    pub fusion: FusionConfig,
    pub explain: ExplainConfig,
    pub escalation: EscalationConfig,
}

impl Default for HarmlensConfig {
    fn default() -> Self {
        Self {
            version: 1,
            fusion: FusionConfig::default(),
            explain: ExplainConfig::default(),
            escalation: EscalationConfig::default(),
        }
    }
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub low_max: Option<u8>,
    pub medium_max: Option<u8>,
    pub max_reasons: Option<usize>,
    pub min_contribution: Option<f64>,
}

impl HarmlensConfig {
    /// Load configuration with 4-layer resolution.
    ///
    /// Validation failure is fatal: the engine must not start with weights
    /// that do not sum to 1.0 or non-monotonic label thresholds.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(_) => {
                        // Non-parse errors from user config are warnings, not fatal.
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("harmlens.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &HarmlensConfig) -> Result<(), ConfigError> {
        let weights = config.fusion.effective_weights();
        if (weights.sum() - 1.0).abs() > 1e-9 {
            return Err(ConfigError::ValidationFailed {
                field: "fusion.weights".to_string(),
                message: format!("must sum to 1.0, got {}", weights.sum()),
            });
        }
        for (name, w) in [
            ("emotion", weights.emotion),
            ("cta", weights.cta),
            ("toxicity", weights.toxicity),
            ("context", weights.context),
            ("child_safety", weights.child_safety),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("fusion.weights.{name}"),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }

        let low_max = config.fusion.effective_low_max();
        let medium_max = config.fusion.effective_medium_max();
        if low_max >= medium_max || medium_max >= 100 {
            return Err(ConfigError::ValidationFailed {
                field: "fusion.low_max/medium_max".to_string(),
                message: format!(
                    "label thresholds must be monotonic (low_max < medium_max < 100), got {low_max}/{medium_max}"
                ),
            });
        }

        let floor = config.fusion.effective_child_score_floor();
        if !(0.0..=1.0).contains(&floor) {
            return Err(ConfigError::ValidationFailed {
                field: "fusion.child_score_floor".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if config.fusion.effective_child_forced_minimum() > 100 {
            return Err(ConfigError::ValidationFailed {
                field: "fusion.child_forced_minimum".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }

        for trigger in &config.fusion.category_triggers {
            if !(0.0..=1.0).contains(&trigger.threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("fusion.category_triggers[{}]", trigger.category),
                    message: "threshold must be between 0.0 and 1.0".to_string(),
                });
            }
        }

        if config.explain.effective_max_reasons() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "explain.max_reasons".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the user config path: `~/.harmlens/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".harmlens").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut HarmlensConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: HarmlensConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` value.
    fn merge(base: &mut HarmlensConfig, other: &HarmlensConfig) {
        if other.version != HarmlensConfig::default().version {
            base.version = other.version;
        }

        // Fusion
        if other.fusion.weights.is_some() {
            base.fusion.weights = other.fusion.weights;
        }
        if other.fusion.low_max.is_some() {
            base.fusion.low_max = other.fusion.low_max;
        }
        if other.fusion.medium_max.is_some() {
            base.fusion.medium_max = other.fusion.medium_max;
        }
        if other.fusion.child_score_floor.is_some() {
            base.fusion.child_score_floor = other.fusion.child_score_floor;
        }
        if other.fusion.child_forced_minimum.is_some() {
            base.fusion.child_forced_minimum = other.fusion.child_forced_minimum;
        }
        if !other.fusion.category_triggers.is_empty() {
            base.fusion.category_triggers = other.fusion.category_triggers.clone();
        }

        // Explain
        if other.explain.max_reasons.is_some() {
            base.explain.max_reasons = other.explain.max_reasons;
        }
        if other.explain.min_contribution.is_some() {
            base.explain.min_contribution = other.explain.min_contribution;
        }
        if other.explain.max_evidence.is_some() {
            base.explain.max_evidence = other.explain.max_evidence;
        }

        // Escalation
        if other.escalation.critical_sla.is_some() {
            base.escalation.critical_sla = other.escalation.critical_sla.clone();
        }
        if other.escalation.high_sla.is_some() {
            base.escalation.high_sla = other.escalation.high_sla.clone();
        }
        if other.escalation.medium_sla.is_some() {
            base.escalation.medium_sla = other.escalation.medium_sla.clone();
        }
        if other.escalation.low_sla.is_some() {
            base.escalation.low_sla = other.escalation.low_sla.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `HARMLENS_FUSION_LOW_MAX`, `HARMLENS_EXPLAIN_MAX_REASONS`, etc.
    fn apply_env_overrides(config: &mut HarmlensConfig) {
        if let Ok(val) = std::env::var("HARMLENS_FUSION_LOW_MAX") {
            if let Ok(v) = val.parse::<u8>() {
                config.fusion.low_max = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HARMLENS_FUSION_MEDIUM_MAX") {
            if let Ok(v) = val.parse::<u8>() {
                config.fusion.medium_max = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HARMLENS_FUSION_CHILD_SCORE_FLOOR") {
            if let Ok(v) = val.parse::<f64>() {
                config.fusion.child_score_floor = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HARMLENS_EXPLAIN_MAX_REASONS") {
            if let Ok(v) = val.parse::<usize>() {
                config.explain.max_reasons = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HARMLENS_EXPLAIN_MIN_CONTRIBUTION") {
            if let Ok(v) = val.parse::<f64>() {
                config.explain.min_contribution = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut HarmlensConfig, cli: &CliOverrides) {
        if let Some(v) = cli.low_max {
            config.fusion.low_max = Some(v);
        }
        if let Some(v) = cli.medium_max {
            config.fusion.medium_max = Some(v);
        }
        if let Some(v) = cli.max_reasons {
            config.explain.max_reasons = Some(v);
        }
        if let Some(v) = cli.min_contribution {
            config.explain.min_contribution = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
