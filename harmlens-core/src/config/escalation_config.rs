//! Escalation SLA configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the escalation lifecycle manager.
///
/// Response-time estimates are assigned once at escalation creation from
/// this table and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EscalationConfig {
    /// SLA estimate for CRITICAL escalations. Default: "<1 hour".
    pub critical_sla: Option<String>,
    /// SLA estimate for HIGH escalations. Default: "2-4 hours".
    pub high_sla: Option<String>,
    /// SLA estimate for MEDIUM escalations. Default: "4-8 hours".
    pub medium_sla: Option<String>,
    /// SLA estimate for LOW escalations. Default: "24-48 hours".
    pub low_sla: Option<String>,
}

impl EscalationConfig {
    pub fn effective_critical_sla(&self) -> String {
        self.critical_sla.clone().unwrap_or_else(|| "<1 hour".to_string())
    }

    pub fn effective_high_sla(&self) -> String {
        self.high_sla.clone().unwrap_or_else(|| "2-4 hours".to_string())
    }

    pub fn effective_medium_sla(&self) -> String {
        self.medium_sla.clone().unwrap_or_else(|| "4-8 hours".to_string())
    }

    pub fn effective_low_sla(&self) -> String {
        self.low_sla.clone().unwrap_or_else(|| "24-48 hours".to_string())
    }
}
