//! Explanation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the explanation generator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExplainConfig {
    /// Maximum number of reasons emitted. Default: 5.
    pub max_reasons: Option<usize>,
    /// Minimum weighted contribution (weight x score) for a signal to earn
    /// its own reason. Default: 0.05.
    pub min_contribution: Option<f64>,
    /// Maximum evidence highlights passed through. Default: 8.
    pub max_evidence: Option<usize>,
}

impl ExplainConfig {
    /// Effective reason cap, defaulting to 5.
    pub fn effective_max_reasons(&self) -> usize {
        self.max_reasons.unwrap_or(5)
    }

    /// Effective contribution threshold, defaulting to 0.05.
    pub fn effective_min_contribution(&self) -> f64 {
        self.min_contribution.unwrap_or(0.05)
    }

    /// Effective evidence cap, defaulting to 8.
    pub fn effective_max_evidence(&self) -> usize {
        self.max_evidence.unwrap_or(8)
    }
}
