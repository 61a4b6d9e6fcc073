//! SignalSource trait — injected detector collaborator.
//!
//! Detector services (emotion, toxicity, CTA, context, child-safety) live
//! outside the engine. Earlier iterations loaded them as process-wide
//! singletons; modeling them as an injected capability lets tests
//! substitute deterministic stubs.

use crate::signal::RawSignal;

/// Provider of raw per-signal detector outputs for one content item.
///
/// Implementations wrap whatever inference stack the deployment uses.
/// Outputs are untrusted: scores may be out of range, categories and flags
/// may be missing. The normalizer is responsible for sanitizing them.
pub trait SignalSource: Send + Sync {
    /// Produce raw signal outputs for the given content.
    fn signals(&self, content_id: &str, text: &str) -> Vec<RawSignal>;
}

/// A fixed-output source for tests and fixtures.
pub struct StaticSignalSource {
    outputs: Vec<RawSignal>,
}

impl StaticSignalSource {
    pub fn new(outputs: Vec<RawSignal>) -> Self {
        Self { outputs }
    }
}

impl SignalSource for StaticSignalSource {
    fn signals(&self, _content_id: &str, _text: &str) -> Vec<RawSignal> {
        self.outputs.clone()
    }
}
