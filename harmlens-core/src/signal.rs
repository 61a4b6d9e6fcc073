//! Canonical signal identity and raw detector output shapes.
//!
//! Detectors are external collaborators. Their output enters the engine as
//! [`RawSignal`] and is only trusted after normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SignalError;

/// Guardrail flag set by the child-safety detector.
pub const CHILD_FLAG: &str = "child_flag";

/// The five recognized risk signals, in evaluation order.
///
/// Unknown names are rejected at the normalizer boundary — there is no
/// catch-all variant by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalName {
    Emotion,
    Cta,
    Toxicity,
    Context,
    ChildSafety,
}

impl SignalName {
    /// All signals in evaluation order. Fusion requires every one of these.
    pub const ALL: [SignalName; 5] = [
        Self::Emotion,
        Self::Cta,
        Self::Toxicity,
        Self::Context,
        Self::ChildSafety,
    ];

    /// Signal name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Emotion => "emotion",
            Self::Cta => "cta",
            Self::Toxicity => "toxicity",
            Self::Context => "context",
            Self::ChildSafety => "child_safety",
        }
    }

    /// Severity precedence for explanation tie-breaking. Lower ranks first.
    pub fn severity_rank(&self) -> u8 {
        match self {
            Self::ChildSafety => 0,
            Self::Toxicity => 1,
            Self::Emotion => 2,
            Self::Cta => 3,
            Self::Context => 4,
        }
    }

    /// Human-readable display label (original dashboard naming).
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Emotion => "Emotion",
            Self::Cta => "Call-to-Action",
            Self::Toxicity => "Toxicity",
            Self::Context => "Context Sensitivity",
            Self::ChildSafety => "Child Safety",
        }
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignalName {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emotion" => Ok(Self::Emotion),
            "cta" => Ok(Self::Cta),
            "toxicity" => Ok(Self::Toxicity),
            "context" => Ok(Self::Context),
            "child_safety" => Ok(Self::ChildSafety),
            other => Err(SignalError::UnknownSignal {
                name: other.to_string(),
            }),
        }
    }
}

/// A matched text span from detector metadata, passed through to the
/// explanation output untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Snippet of the original content around the match.
    pub snippet: String,
    /// The matched phrase.
    pub trigger: String,
    /// Why the detector flagged it (e.g. "Call-to-action").
    pub note: String,
}

/// Untrusted detector output for one signal.
///
/// Score may be out of range or non-finite; categories and flags may be
/// absent entirely. The normalizer is the only consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSignal {
    pub name: String,
    pub score: f64,
    pub categories: Option<Vec<String>>,
    pub flags: Option<Vec<String>>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl RawSignal {
    /// Convenience constructor for a bare score.
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            categories: None,
            flags: None,
            evidence: Vec::new(),
        }
    }
}
