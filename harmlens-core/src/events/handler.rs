//! HarmlensEventHandler trait — no-op defaults for every event.

use super::types::*;

/// Observer of engine events. All methods default to no-ops so handlers
/// implement only what they care about (a webhook sender only needs
/// escalation transitions, an audit mirror only needs completions).
pub trait HarmlensEventHandler: Send + Sync {
    fn on_assessment_completed(&self, event: &AssessmentCompletedEvent) {
        let _ = event;
    }

    fn on_assessment_failed(&self, event: &AssessmentFailedEvent) {
        let _ = event;
    }

    fn on_signal_clamped(&self, event: &SignalClampedEvent) {
        let _ = event;
    }

    fn on_child_safety_override(&self, event: &ChildSafetyOverrideEvent) {
        let _ = event;
    }

    fn on_escalation_created(&self, event: &EscalationCreatedEvent) {
        let _ = event;
    }

    fn on_escalation_transition(&self, event: &EscalationTransitionEvent) {
        let _ = event;
    }

    fn on_error(&self, event: &ErrorEvent) {
        let _ = event;
    }
}
