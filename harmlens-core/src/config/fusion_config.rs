//! Fusion configuration: weights, label thresholds, override floor, and the
//! category-trigger table.
//!
//! These were scattered literals in earlier iterations of the scoring logic;
//! they are an explicit, versioned structure so tuning is reviewable and
//! test fixtures are reproducible.

use serde::{Deserialize, Serialize};

use crate::signal::SignalName;

/// The resolved weight table used by the fusion engine.
///
/// Invariant: the five weights sum to 1.0. Validated at config load and
/// again at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub emotion: f64,
    pub cta: f64,
    pub toxicity: f64,
    pub context: f64,
    pub child_safety: f64,
}

impl SignalWeights {
    /// Weight for a given signal.
    pub fn weight(&self, signal: SignalName) -> f64 {
        match signal {
            SignalName::Emotion => self.emotion,
            SignalName::Cta => self.cta,
            SignalName::Toxicity => self.toxicity,
            SignalName::Context => self.context,
            SignalName::ChildSafety => self.child_safety,
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.emotion + self.cta + self.toxicity + self.context + self.child_safety
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            emotion: 0.30,
            cta: 0.25,
            toxicity: 0.20,
            context: 0.15,
            child_safety: 0.10,
        }
    }
}

/// One row of the category-trigger table: when `signal`'s normalized score
/// reaches `threshold`, `category` is added to the assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrigger {
    pub signal: SignalName,
    pub threshold: f64,
    pub category: String,
}

impl CategoryTrigger {
    pub fn new(signal: SignalName, threshold: f64, category: impl Into<String>) -> Self {
        Self {
            signal,
            threshold,
            category: category.into(),
        }
    }
}

/// Configuration for the risk fusion engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FusionConfig {
    /// Signal weight overrides. Defaults: emotion 0.30, cta 0.25,
    /// toxicity 0.20, context 0.15, child_safety 0.10.
    pub weights: Option<SignalWeights>,
    /// Upper bound of the Low band (inclusive). Default: 39.
    pub low_max: Option<u8>,
    /// Upper bound of the Medium band (inclusive). Default: 69.
    pub medium_max: Option<u8>,
    /// Child-safety score above which the override can fire. Default: 0.6.
    pub child_score_floor: Option<f64>,
    /// Score floor forced by the child-safety override. Default: 80.
    pub child_forced_minimum: Option<u8>,
    /// Category-trigger table. Empty means compiled defaults.
    #[serde(default)]
    pub category_triggers: Vec<CategoryTrigger>,
}

impl FusionConfig {
    /// Effective weight table, defaulting to the shipped weights.
    pub fn effective_weights(&self) -> SignalWeights {
        self.weights.unwrap_or_default()
    }

    /// Effective Low band upper bound, defaulting to 39.
    pub fn effective_low_max(&self) -> u8 {
        self.low_max.unwrap_or(39)
    }

    /// Effective Medium band upper bound, defaulting to 69.
    pub fn effective_medium_max(&self) -> u8 {
        self.medium_max.unwrap_or(69)
    }

    /// Effective child-safety override floor, defaulting to 0.6.
    pub fn effective_child_score_floor(&self) -> f64 {
        self.child_score_floor.unwrap_or(0.6)
    }

    /// Effective forced minimum score, defaulting to 80.
    pub fn effective_child_forced_minimum(&self) -> u8 {
        self.child_forced_minimum.unwrap_or(80)
    }

    /// Effective category-trigger table.
    ///
    /// Defaults carry over the original trigger thresholds: high emotion
    /// implies fear-mongering even when the detector did not tag it.
    pub fn effective_category_triggers(&self) -> Vec<CategoryTrigger> {
        if !self.category_triggers.is_empty() {
            return self.category_triggers.clone();
        }
        vec![
            CategoryTrigger::new(SignalName::Emotion, 0.7, "Panic/Fear-mongering"),
            CategoryTrigger::new(SignalName::Cta, 0.3, "Mobilization/Call-to-Action"),
            CategoryTrigger::new(SignalName::Toxicity, 0.3, "Toxic/Hostile Language"),
            CategoryTrigger::new(SignalName::Context, 0.3, "Sensitive Context"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = SignalWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn default_thresholds() {
        let config = FusionConfig::default();
        assert_eq!(config.effective_low_max(), 39);
        assert_eq!(config.effective_medium_max(), 69);
        assert_eq!(config.effective_child_forced_minimum(), 80);
    }

    #[test]
    fn explicit_triggers_replace_defaults() {
        let config = FusionConfig {
            category_triggers: vec![CategoryTrigger::new(
                SignalName::Toxicity,
                0.5,
                "Hostile",
            )],
            ..Default::default()
        };
        let triggers = config.effective_category_triggers();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].category, "Hostile");
    }
}
