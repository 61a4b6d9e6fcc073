//! The finalized risk assessment record and its audit serialization.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use xxhash_rust::xxh3::xxh3_64;

use harmlens_core::errors::PipelineError;
use harmlens_core::priority::Priority;
use harmlens_core::signal::Evidence;

use crate::fusion::{BreakdownEntry, RiskLabel};
use crate::signals::SignalSet;

/// The fused, explainable verdict for one content item.
///
/// Immutable once finalized: re-analysis creates a new assessment with a
/// new identity, never mutates history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub content_id: String,
    /// Version of the config tables that produced this verdict.
    pub config_version: u32,
    /// The normalized signals this verdict was fused from, in evaluation
    /// order. Owned exclusively by this assessment.
    pub signals: SignalSet,
    /// Fused risk score, always in 0..=100.
    pub score: u8,
    pub label: RiskLabel,
    pub categories: Vec<String>,
    /// Per-signal contributions, for dashboards and audit.
    pub breakdown: Vec<BreakdownEntry>,
    /// Ranked explanation, most significant first.
    pub reasons: SmallVec<[String; 5]>,
    pub evidence: Vec<Evidence>,
    pub action: String,
    pub priority: Priority,
    pub queue: String,
}

impl RiskAssessment {
    /// Stable JSON serialization for the persistence and audit-mirror
    /// collaborators.
    pub fn to_audit_json(&self) -> Result<String, PipelineError> {
        serde_json::to_string(self).map_err(|e| PipelineError::Serialization(e.to_string()))
    }

    /// xxh3 64-bit digest of the audit serialization — suitable input for
    /// an immutable audit log.
    pub fn audit_digest(&self) -> Result<u64, PipelineError> {
        Ok(xxh3_64(self.to_audit_json()?.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> RiskAssessment {
        RiskAssessment {
            content_id: "c1".into(),
            config_version: 1,
            signals: SignalSet::new(),
            score: 58,
            label: RiskLabel::Medium,
            categories: vec!["General Content".into()],
            breakdown: Vec::new(),
            reasons: SmallVec::new(),
            evidence: Vec::new(),
            action: "Add Warning / Reduce Reach".into(),
            priority: Priority::Medium,
            queue: "Standard Review Queue".into(),
        }
    }

    #[test]
    fn audit_digest_is_stable() {
        let a = assessment();
        assert_eq!(a.audit_digest().unwrap(), a.audit_digest().unwrap());
    }

    #[test]
    fn audit_digest_changes_with_content() {
        let a = assessment();
        let mut b = assessment();
        b.score = 59;
        assert_ne!(a.audit_digest().unwrap(), b.audit_digest().unwrap());
    }

    #[test]
    fn audit_json_round_trips() {
        let a = assessment();
        let json = a.to_audit_json().unwrap();
        let parsed: RiskAssessment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.score, a.score);
        assert_eq!(parsed.label, a.label);
    }
}
