//! harmlens-engine — the HarmLens risk assessment and moderation workflow
//! engine.
//!
//! The analysis half (normalize → fuse → explain → route) is synchronous
//! and side-effect-free; the escalation half guards the only genuinely
//! shared mutable state behind per-record locks. Detectors, persistence,
//! and the audit mirror are collaborators at the boundary.

pub mod assessment;
pub mod escalation;
pub mod explain;
pub mod fusion;
pub mod pipeline;
pub mod routing;
pub mod signals;

pub use assessment::RiskAssessment;
pub use escalation::{
    Escalation, EscalationFilter, EscalationKind, EscalationManager, EscalationStats,
    EscalationStatus,
};
pub use explain::{Explanation, ExplanationGenerator};
pub use fusion::{BreakdownEntry, FusionOutcome, RiskFusionEngine, RiskLabel};
pub use pipeline::AnalysisPipeline;
pub use routing::{route, Routing};
pub use signals::{SignalNormalizer, SignalResult, SignalSet};
