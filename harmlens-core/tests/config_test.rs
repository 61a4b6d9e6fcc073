//! Tests for the HarmLens configuration system.

use std::sync::Mutex;

use harmlens_core::config::harmlens_config::{CliOverrides, HarmlensConfig};
use harmlens_core::errors::ConfigError;
use harmlens_core::signal::SignalName;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper: create a temporary directory.
fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all HARMLENS_ env vars to prevent cross-test contamination.
fn clear_harmlens_env_vars() {
    for key in [
        "HARMLENS_FUSION_LOW_MAX",
        "HARMLENS_FUSION_MEDIUM_MAX",
        "HARMLENS_FUSION_CHILD_SCORE_FLOOR",
        "HARMLENS_EXPLAIN_MAX_REASONS",
        "HARMLENS_EXPLAIN_MIN_CONTRIBUTION",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_four_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_harmlens_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("harmlens.toml");
    std::fs::write(
        &project_toml,
        r#"
[fusion]
low_max = 30
medium_max = 60

[explain]
max_reasons = 3
"#,
    )
    .unwrap();

    // Env var overrides project config
    std::env::set_var("HARMLENS_FUSION_LOW_MAX", "35");

    let cli = CliOverrides {
        max_reasons: Some(4),
        ..Default::default()
    };

    let config = HarmlensConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI overrides env and project for max_reasons
    assert_eq!(config.explain.max_reasons, Some(4));
    // Env overrides project for low_max
    assert_eq!(config.fusion.low_max, Some(35));
    // Project value survives where nothing overrides it
    assert_eq!(config.fusion.medium_max, Some(60));

    clear_harmlens_env_vars();
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_harmlens_env_vars();

    let dir = tempdir();
    // No harmlens.toml exists
    let config = HarmlensConfig::load(dir.path(), None).unwrap();

    // Compiled defaults
    assert_eq!(config.version, 1);
    assert_eq!(config.fusion.effective_low_max(), 39);
    assert_eq!(config.fusion.effective_medium_max(), 69);
    assert_eq!(config.fusion.effective_child_forced_minimum(), 80);
    assert_eq!(config.explain.effective_max_reasons(), 5);
    assert_eq!(config.escalation.effective_high_sla(), "2-4 hours");
}

#[test]
fn test_default_weights_sum_to_one() {
    let config = HarmlensConfig::default();
    let weights = config.fusion.effective_weights();
    assert!((weights.sum() - 1.0).abs() < 1e-9);
    assert_eq!(weights.emotion, 0.30);
    assert_eq!(weights.cta, 0.25);
    assert_eq!(weights.toxicity, 0.20);
    assert_eq!(weights.context, 0.15);
    assert_eq!(weights.child_safety, 0.10);
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_harmlens_env_vars();

    let dir = tempdir();
    let project_toml = dir.path().join("harmlens.toml");
    std::fs::write(&project_toml, "this is not valid toml {{{{").unwrap();

    let result = HarmlensConfig::load(dir.path(), None);
    match result.unwrap_err() {
        ConfigError::ParseError { .. } => {}
        other => panic!("Expected ParseError, got: {other:?}"),
    }
}

#[test]
fn test_weights_must_sum_to_one() {
    let toml_str = r#"
[fusion.weights]
emotion = 0.5
cta = 0.5
toxicity = 0.5
context = 0.0
child_safety = 0.0
"#;
    let result = HarmlensConfig::from_toml(toml_str);
    match result.unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "fusion.weights");
        }
        other => panic!("Expected ValidationFailed, got: {other:?}"),
    }
}

#[test]
fn test_non_monotonic_thresholds_rejected() {
    let toml_str = r#"
[fusion]
low_max = 70
medium_max = 50
"#;
    let result = HarmlensConfig::from_toml(toml_str);
    assert!(matches!(
        result.unwrap_err(),
        ConfigError::ValidationFailed { .. }
    ));
}

#[test]
fn test_category_trigger_threshold_bounds() {
    let toml_str = r#"
[[fusion.category_triggers]]
signal = "emotion"
threshold = 1.5
category = "Panic/Fear-mongering"
"#;
    let result = HarmlensConfig::from_toml(toml_str);
    assert!(matches!(
        result.unwrap_err(),
        ConfigError::ValidationFailed { .. }
    ));
}

#[test]
fn test_custom_category_triggers_parse() {
    let toml_str = r#"
[[fusion.category_triggers]]
signal = "toxicity"
threshold = 0.4
category = "Hostile Language"
"#;
    let config = HarmlensConfig::from_toml(toml_str).unwrap();
    let triggers = config.fusion.effective_category_triggers();
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].signal, SignalName::Toxicity);
    assert_eq!(triggers[0].category, "Hostile Language");
}

#[test]
fn test_toml_round_trip() {
    let config = HarmlensConfig::default();
    let toml_str = config.to_toml().unwrap();
    let parsed = HarmlensConfig::from_toml(&toml_str).unwrap();
    assert_eq!(parsed.version, config.version);
    assert_eq!(
        parsed.fusion.effective_low_max(),
        config.fusion.effective_low_max()
    );
}

#[test]
fn test_zero_max_reasons_rejected() {
    let toml_str = r#"
[explain]
max_reasons = 0
"#;
    let result = HarmlensConfig::from_toml(toml_str);
    assert!(matches!(
        result.unwrap_err(),
        ConfigError::ValidationFailed { .. }
    ));
}
