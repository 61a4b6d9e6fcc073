//! Escalation record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use harmlens_core::priority::Priority;

/// Why a moderator escalated a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationKind {
    ChildSafety,
    Legal,
    UrgentReview,
    PolicyViolation,
    Other,
}

impl EscalationKind {
    /// Kind as the wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChildSafety => "child_safety",
            Self::Legal => "legal",
            Self::UrgentReview => "urgent_review",
            Self::PolicyViolation => "policy_violation",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EscalationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationStatus {
    Pending,
    InProgress,
    Responded,
    Resolved,
}

impl EscalationStatus {
    /// Status as the wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Responded => "responded",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for EscalationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked human-review request, independent of the automatic risk score.
///
/// Only the lifecycle manager mutates `status` and the derived timestamps.
/// Callers always receive cloned snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub id: u64,
    pub content_id: String,
    pub escalated_by: String,
    pub kind: EscalationKind,
    /// Chosen by the moderator; a human may escalate Low-risk content for
    /// contextual reasons.
    pub priority: Priority,
    pub reason: String,
    pub status: EscalationStatus,
    pub assigned_to: Option<String>,
    /// SLA estimate assigned once at creation, never recomputed.
    pub response_time_estimate: String,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    pub responded_at_ms: Option<u64>,
    pub resolved_at_ms: Option<u64>,
    pub resolution_notes: Option<String>,
    /// True when force-closed from a state other than `responded`. The
    /// audit trail distinguishes early closure from normal resolution.
    pub short_circuit: bool,
    /// Bumped on every transition; basis for optimistic concurrency.
    pub version: u64,
}

impl Escalation {
    /// Returns true if the escalation has reached its terminal state.
    pub fn is_resolved(&self) -> bool {
        self.status == EscalationStatus::Resolved
    }
}

/// Query filter for listing escalations. All fields conjunctive.
#[derive(Debug, Clone, Default)]
pub struct EscalationFilter {
    pub status: Option<EscalationStatus>,
    pub priority: Option<Priority>,
    pub kind: Option<EscalationKind>,
    pub escalated_by: Option<String>,
}

impl EscalationFilter {
    pub(crate) fn matches(&self, escalation: &Escalation) -> bool {
        self.status.map_or(true, |s| escalation.status == s)
            && self.priority.map_or(true, |p| escalation.priority == p)
            && self.kind.map_or(true, |k| escalation.kind == k)
            && self
                .escalated_by
                .as_ref()
                .map_or(true, |actor| &escalation.escalated_by == actor)
    }
}

/// Counts by lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationStats {
    pub pending: usize,
    pub in_progress: usize,
    pub responded: usize,
    pub resolved: usize,
}

impl EscalationStats {
    /// Escalations not yet resolved.
    pub fn open(&self) -> usize {
        self.pending + self.in_progress + self.responded
    }
}
