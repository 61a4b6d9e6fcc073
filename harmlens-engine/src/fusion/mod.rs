//! Risk fusion engine.
//!
//! Deterministic aggregation of the five normalized signals into a single
//! 0-100 risk score with label and derived categories. Missing signals are
//! rejected, never defaulted — a partial score must not look like a verdict.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use harmlens_core::config::{CategoryTrigger, FusionConfig, SignalWeights};
use harmlens_core::errors::FusionError;
use harmlens_core::events::types::ChildSafetyOverrideEvent;
use harmlens_core::events::EventDispatcher;
use harmlens_core::signal::SignalName;

use crate::signals::SignalSet;

/// Category sentinel some detectors emit for clean content. Never carried
/// into an assessment's category set.
const SAFE_SENTINEL: &str = "Safe";

/// Category applied when no signal contributed one.
const GENERAL_CONTENT: &str = "General Content";

/// Category applied whenever the child guardrail flag is set.
const CHILD_SAFETY_CONCERN: &str = "Child Safety Concern";

/// Risk label, a pure function of the fused score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    /// Classify a score against the configured band boundaries.
    pub fn from_score(score: u8, low_max: u8, medium_max: u8) -> Self {
        if score <= low_max {
            Self::Low
        } else if score <= medium_max {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Label as string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-signal contribution, kept on the assessment for dashboards and audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub signal: SignalName,
    pub score: f64,
    pub weighted: f64,
}

/// Output of one fusion pass, consumed by the pipeline.
#[derive(Debug, Clone)]
pub struct FusionOutcome {
    pub score: u8,
    pub label: RiskLabel,
    pub categories: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
    /// True when the child-safety floor was applied.
    pub child_override: bool,
}

/// Fuses normalized signals into a risk verdict.
pub struct RiskFusionEngine {
    weights: SignalWeights,
    low_max: u8,
    medium_max: u8,
    child_score_floor: f64,
    child_forced_minimum: u8,
    category_triggers: Vec<CategoryTrigger>,
    dispatcher: Arc<EventDispatcher>,
}

impl RiskFusionEngine {
    /// Build an engine from config, failing fast if weights do not sum to 1.0.
    pub fn new(
        config: &FusionConfig,
        dispatcher: Arc<EventDispatcher>,
    ) -> Result<Self, FusionError> {
        let weights = config.effective_weights();
        if (weights.sum() - 1.0).abs() > 1e-9 {
            return Err(FusionError::InvalidWeights { sum: weights.sum() });
        }
        Ok(Self {
            weights,
            low_max: config.effective_low_max(),
            medium_max: config.effective_medium_max(),
            child_score_floor: config.effective_child_score_floor(),
            child_forced_minimum: config.effective_child_forced_minimum(),
            category_triggers: config.effective_category_triggers(),
            dispatcher,
        })
    }

    /// The weight table this engine was built with.
    pub fn weights(&self) -> SignalWeights {
        self.weights
    }

    /// Fuse a signal set into a score, label, and category list.
    ///
    /// Every signal in [`SignalName::ALL`] must be present.
    pub fn fuse(&self, content_id: &str, signals: &SignalSet) -> Result<FusionOutcome, FusionError> {
        let mut raw = 0.0;
        let mut breakdown = Vec::with_capacity(SignalName::ALL.len());
        for name in SignalName::ALL {
            let signal = signals.get(name).ok_or_else(|| FusionError::MissingSignal {
                name: name.name().to_string(),
            })?;
            let weighted = self.weights.weight(name) * signal.score;
            raw += weighted;
            breakdown.push(BreakdownEntry {
                signal: name,
                score: signal.score,
                weighted,
            });
        }

        let mut score = (raw * 100.0).round() as u8;

        // Child-safety hard floor: false negatives here are unacceptable
        // even when every other signal is muted.
        let child_score = signals
            .get(SignalName::ChildSafety)
            .map_or(0.0, |s| s.score);
        let child_override = signals.child_flag() && child_score > self.child_score_floor;
        if child_override && score < self.child_forced_minimum {
            warn!(
                content_id,
                base_score = score,
                forced = self.child_forced_minimum,
                "child-safety override raised risk score"
            );
            self.dispatcher
                .emit_child_safety_override(&ChildSafetyOverrideEvent {
                    content_id: content_id.to_string(),
                    base_score: score,
                    forced_score: self.child_forced_minimum,
                });
            score = self.child_forced_minimum;
        }

        let label = RiskLabel::from_score(score, self.low_max, self.medium_max);
        let categories = self.derive_categories(signals, child_override);

        debug!(content_id, score, label = label.name(), "fused risk signals");

        Ok(FusionOutcome {
            score,
            label,
            categories,
            breakdown,
            child_override,
        })
    }

    /// Union of signal-contributed categories plus trigger-table hits, in a
    /// stable order: signal insertion order first, then table order.
    fn derive_categories(&self, signals: &SignalSet, child_override: bool) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        let mut push_unique = |cats: &mut Vec<String>, value: &str| {
            if !cats.iter().any(|c| c == value) {
                cats.push(value.to_string());
            }
        };

        for signal in signals.iter() {
            for category in &signal.categories {
                if category != SAFE_SENTINEL {
                    push_unique(&mut categories, category);
                }
            }
        }

        for trigger in &self.category_triggers {
            if let Some(signal) = signals.get(trigger.signal) {
                if signal.score >= trigger.threshold {
                    push_unique(&mut categories, &trigger.category);
                }
            }
        }

        if child_override || signals.child_flag() {
            push_unique(&mut categories, CHILD_SAFETY_CONCERN);
        }

        if categories.is_empty() {
            categories.push(GENERAL_CONTENT.to_string());
        }

        categories
    }
}
