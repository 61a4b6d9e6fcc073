//! Signal result normalization.
//!
//! The only gate between untrusted detector output and the fusion engine.
//! Everything downstream may assume scores are finite and in [0, 1] and
//! that category/flag sets exist.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use harmlens_core::errors::SignalError;
use harmlens_core::events::types::SignalClampedEvent;
use harmlens_core::events::EventDispatcher;
use harmlens_core::signal::{Evidence, RawSignal, SignalName, CHILD_FLAG};

/// A validated, immutable detector result.
///
/// Owned exclusively by the assessment that consumes it; never shared
/// across assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResult {
    pub name: SignalName,
    /// Normalized score, always in [0.0, 1.0].
    pub score: f64,
    pub categories: Vec<String>,
    pub flags: Vec<String>,
    pub evidence: Vec<Evidence>,
}

impl SignalResult {
    /// Returns true if the given guardrail flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// Insertion-ordered set of normalized signals, keyed by name.
///
/// Insertion order is evaluation order; the explanation generator relies on
/// it for deterministic tie-breaking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalSet {
    entries: Vec<SignalResult>,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a signal. A repeated name replaces the earlier entry in place,
    /// preserving its original position.
    pub fn insert(&mut self, signal: SignalResult) {
        if let Some(existing) = self.entries.iter_mut().find(|s| s.name == signal.name) {
            *existing = signal;
        } else {
            self.entries.push(signal);
        }
    }

    pub fn get(&self, name: SignalName) -> Option<&SignalResult> {
        self.entries.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the child-safety signal carries the child flag.
    pub fn child_flag(&self) -> bool {
        self.get(SignalName::ChildSafety)
            .is_some_and(|s| s.has_flag(CHILD_FLAG))
    }
}

/// Validates and clamps raw detector output into [`SignalResult`]s.
pub struct SignalNormalizer {
    dispatcher: Arc<EventDispatcher>,
}

impl SignalNormalizer {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Normalize one raw detector output.
    ///
    /// Unknown signal names and NaN scores are rejected. Out-of-range
    /// scores (including infinities) are clamped into [0, 1] and logged —
    /// model drift and numeric edge cases must never reach fusion.
    pub fn normalize(&self, raw: &RawSignal) -> Result<SignalResult, SignalError> {
        let name: SignalName = raw.name.parse()?;

        if raw.score.is_nan() {
            return Err(SignalError::NonFiniteScore {
                name: name.name().to_string(),
            });
        }

        let score = raw.score.clamp(0.0, 1.0);
        if score != raw.score {
            warn!(
                signal = name.name(),
                raw_score = raw.score,
                clamped = score,
                "clamped out-of-range detector score"
            );
            self.dispatcher.emit_signal_clamped(&SignalClampedEvent {
                signal: name.name().to_string(),
                raw_score: raw.score,
                clamped_score: score,
            });
        }

        Ok(SignalResult {
            name,
            score,
            categories: raw.categories.clone().unwrap_or_default(),
            flags: raw.flags.clone().unwrap_or_default(),
            evidence: raw.evidence.clone(),
        })
    }

    /// Normalize a batch of raw outputs into an ordered set.
    pub fn normalize_all(&self, raws: &[RawSignal]) -> Result<SignalSet, SignalError> {
        let mut set = SignalSet::new();
        for raw in raws {
            set.insert(self.normalize(raw)?);
        }
        Ok(set)
    }
}
