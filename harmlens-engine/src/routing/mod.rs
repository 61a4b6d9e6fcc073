//! Action router.
//!
//! Pure, total mapping from a risk verdict to an operational decision.
//! No side effects, idempotent by construction.

use serde::{Deserialize, Serialize};

use harmlens_core::priority::Priority;

use crate::fusion::RiskLabel;

/// The operational decision attached to a finalized assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routing {
    pub action: String,
    pub priority: Priority,
    pub queue: String,
}

impl Routing {
    fn new(action: &str, priority: Priority, queue: &str) -> Self {
        Self {
            action: action.to_string(),
            priority,
            queue: queue.to_string(),
        }
    }
}

/// Route a verdict to an action, priority, and queue.
///
/// The child-safety rule takes absolute precedence: flagged content at
/// Medium risk or above always lands in the Child Safety Queue.
pub fn route(label: RiskLabel, child_flag: bool) -> Routing {
    if child_flag && label != RiskLabel::Low {
        return Routing::new(
            "Escalate to Child Safety",
            Priority::Critical,
            "Child Safety Queue",
        );
    }
    match label {
        RiskLabel::High => Routing::new(
            "Human Review Required",
            Priority::High,
            "Priority Review Queue",
        ),
        RiskLabel::Medium => Routing::new(
            "Add Warning / Reduce Reach",
            Priority::Medium,
            "Standard Review Queue",
        ),
        RiskLabel::Low => Routing::new("Monitor", Priority::Low, "Automated Monitoring"),
    }
}
