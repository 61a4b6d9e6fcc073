//! Escalation lifecycle: human-initiated review requests tracked through a
//! pending → in_progress → responded → resolved state machine.

pub mod manager;
pub mod types;

pub use manager::EscalationManager;
pub use types::{
    Escalation, EscalationFilter, EscalationKind, EscalationStats, EscalationStatus,
};
