//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::HarmlensEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec —
/// effectively zero cost.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn HarmlensEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn HarmlensEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn HarmlensEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Assessment Lifecycle ----
    pub fn emit_assessment_completed(&self, event: &AssessmentCompletedEvent) {
        self.emit(|h| h.on_assessment_completed(event));
    }

    pub fn emit_assessment_failed(&self, event: &AssessmentFailedEvent) {
        self.emit(|h| h.on_assessment_failed(event));
    }

    // ---- Signals ----
    pub fn emit_signal_clamped(&self, event: &SignalClampedEvent) {
        self.emit(|h| h.on_signal_clamped(event));
    }

    pub fn emit_child_safety_override(&self, event: &ChildSafetyOverrideEvent) {
        self.emit(|h| h.on_child_safety_override(event));
    }

    // ---- Escalations ----
    pub fn emit_escalation_created(&self, event: &EscalationCreatedEvent) {
        self.emit(|h| h.on_escalation_created(event));
    }

    pub fn emit_escalation_transition(&self, event: &EscalationTransitionEvent) {
        self.emit(|h| h.on_escalation_transition(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
