//! Event payload types for all HarmLens events.

/// Payload for `on_assessment_completed`.
#[derive(Debug, Clone)]
pub struct AssessmentCompletedEvent {
    pub content_id: String,
    pub score: u8,
    pub label: String,
    pub action: String,
    pub queue: String,
}

/// Payload for `on_assessment_failed`.
#[derive(Debug, Clone)]
pub struct AssessmentFailedEvent {
    pub content_id: String,
    pub error_code: String,
    pub message: String,
}

/// Payload for `on_signal_clamped`.
#[derive(Debug, Clone)]
pub struct SignalClampedEvent {
    pub signal: String,
    pub raw_score: f64,
    pub clamped_score: f64,
}

/// Payload for `on_child_safety_override`.
#[derive(Debug, Clone)]
pub struct ChildSafetyOverrideEvent {
    pub content_id: String,
    pub base_score: u8,
    pub forced_score: u8,
}

/// Payload for `on_escalation_created`.
#[derive(Debug, Clone)]
pub struct EscalationCreatedEvent {
    pub escalation_id: u64,
    pub content_id: String,
    pub kind: String,
    pub priority: String,
    pub escalated_by: String,
}

/// Payload for `on_escalation_transition`.
///
/// `short_circuit` is true when a moderator force-closed the escalation
/// from a state other than `responded` — the audit trail must distinguish
/// early closure from normal resolution.
#[derive(Debug, Clone)]
pub struct EscalationTransitionEvent {
    pub escalation_id: u64,
    pub content_id: String,
    pub from_status: String,
    pub to_status: String,
    pub actor: String,
    pub short_circuit: bool,
    pub timestamp_ms: u64,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
