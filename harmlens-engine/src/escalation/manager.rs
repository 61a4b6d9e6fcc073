//! Escalation lifecycle manager.
//!
//! Exclusively owns mutation of escalation status and derived timestamps.
//! Each record sits behind its own lock so two concurrent transition
//! requests cannot both succeed — exactly one wins, the loser gets an
//! error, never a silent overwrite. Transitions are all-or-nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use harmlens_core::config::EscalationConfig;
use harmlens_core::errors::EscalationError;
use harmlens_core::events::types::{EscalationCreatedEvent, EscalationTransitionEvent};
use harmlens_core::events::EventDispatcher;
use harmlens_core::priority::Priority;

use super::types::{
    Escalation, EscalationFilter, EscalationKind, EscalationStats, EscalationStatus,
};

/// Milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Tracks escalations from creation to resolution.
pub struct EscalationManager {
    config: EscalationConfig,
    dispatcher: Arc<EventDispatcher>,
    next_id: AtomicU64,
    records: RwLock<FxHashMap<u64, Arc<Mutex<Escalation>>>>,
}

impl EscalationManager {
    pub fn new(config: EscalationConfig, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            config,
            dispatcher,
            next_id: AtomicU64::new(1),
            records: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a new escalation in `pending`.
    ///
    /// The SLA estimate is assigned from the priority table once, here, and
    /// never recomputed. Fails if an unresolved escalation of the same kind
    /// already exists for the content — one queue entry per concern.
    pub fn create(
        &self,
        content_id: &str,
        escalated_by: &str,
        kind: EscalationKind,
        priority: Priority,
        reason: &str,
    ) -> Result<Escalation, EscalationError> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        for record in records.values() {
            let record = record.lock().unwrap_or_else(PoisonError::into_inner);
            if record.content_id == content_id && record.kind == kind && !record.is_resolved() {
                return Err(EscalationError::Duplicate {
                    content_id: content_id.to_string(),
                    kind: kind.as_str(),
                });
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = now_ms();
        let escalation = Escalation {
            id,
            content_id: content_id.to_string(),
            escalated_by: escalated_by.to_string(),
            kind,
            priority,
            reason: reason.to_string(),
            status: EscalationStatus::Pending,
            assigned_to: None,
            response_time_estimate: self.sla_for(priority),
            created_at_ms: now,
            updated_at_ms: now,
            responded_at_ms: None,
            resolved_at_ms: None,
            resolution_notes: None,
            short_circuit: false,
            version: 1,
        };
        records.insert(id, Arc::new(Mutex::new(escalation.clone())));
        drop(records);

        info!(
            escalation_id = id,
            content_id,
            kind = kind.as_str(),
            priority = priority.as_str(),
            "escalation created"
        );
        self.dispatcher
            .emit_escalation_created(&EscalationCreatedEvent {
                escalation_id: id,
                content_id: content_id.to_string(),
                kind: kind.as_str().to_string(),
                priority: priority.as_str().to_string(),
                escalated_by: escalated_by.to_string(),
            });

        Ok(escalation)
    }

    /// `pending → in_progress`; assigns the escalation to `assignee`.
    pub fn start(
        &self,
        id: u64,
        assignee: &str,
        expected_version: Option<u64>,
    ) -> Result<Escalation, EscalationError> {
        self.transition(id, expected_version, assignee, |record| {
            if record.status != EscalationStatus::Pending {
                return Err(EscalationError::InvalidTransition {
                    id: record.id,
                    from: record.status.as_str(),
                    attempted: EscalationStatus::InProgress.as_str(),
                });
            }
            record.status = EscalationStatus::InProgress;
            record.assigned_to = Some(assignee.to_string());
            Ok(false)
        })
    }

    /// `in_progress → responded`; stamps `responded_at` on first entry only.
    pub fn respond(
        &self,
        id: u64,
        actor: &str,
        expected_version: Option<u64>,
    ) -> Result<Escalation, EscalationError> {
        self.transition(id, expected_version, actor, |record| {
            if record.status != EscalationStatus::InProgress {
                return Err(EscalationError::InvalidTransition {
                    id: record.id,
                    from: record.status.as_str(),
                    attempted: EscalationStatus::Responded.as_str(),
                });
            }
            record.status = EscalationStatus::Responded;
            if record.responded_at_ms.is_none() {
                record.responded_at_ms = Some(now_ms().max(record.updated_at_ms));
            }
            Ok(false)
        })
    }

    /// Any non-terminal state → `resolved`.
    ///
    /// Resolution from a state other than `responded` is a short-circuit
    /// (moderator force-close) and is flagged as such on the record and the
    /// transition event.
    pub fn resolve(
        &self,
        id: u64,
        actor: &str,
        notes: Option<&str>,
        expected_version: Option<u64>,
    ) -> Result<Escalation, EscalationError> {
        self.transition(id, expected_version, actor, |record| {
            if record.status == EscalationStatus::Resolved {
                return Err(EscalationError::AlreadyResolved { id: record.id });
            }
            let short_circuit = record.status != EscalationStatus::Responded;
            record.status = EscalationStatus::Resolved;
            record.short_circuit = short_circuit;
            record.resolved_at_ms = Some(now_ms().max(record.updated_at_ms));
            record.resolution_notes = notes.map(str::to_string);
            Ok(short_circuit)
        })
    }

    /// Snapshot of one escalation.
    pub fn get(&self, id: u64) -> Result<Escalation, EscalationError> {
        let record = self.record(id)?;
        let record = record.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(record.clone())
    }

    /// Snapshot of all escalations matching the filter.
    ///
    /// Default sort: priority (CRITICAL → LOW), then `created_at` ascending
    /// so SLA-risk items surface first.
    pub fn list(&self, filter: &EscalationFilter) -> Vec<Escalation> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut results: Vec<Escalation> = records
            .values()
            .map(|r| r.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .filter(|e| filter.matches(e))
            .collect();
        drop(records);

        results.sort_by_key(|e| (e.priority.rank(), e.created_at_ms, e.id));
        results
    }

    /// Counts by lifecycle state.
    pub fn stats(&self) -> EscalationStats {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut stats = EscalationStats::default();
        for record in records.values() {
            let record = record.lock().unwrap_or_else(PoisonError::into_inner);
            match record.status {
                EscalationStatus::Pending => stats.pending += 1,
                EscalationStatus::InProgress => stats.in_progress += 1,
                EscalationStatus::Responded => stats.responded += 1,
                EscalationStatus::Resolved => stats.resolved += 1,
            }
        }
        stats
    }

    /// Apply a transition under the record's exclusive lock.
    ///
    /// The closure returns whether the transition was a short-circuit.
    /// Every successful transition bumps the version, advances `updated_at`
    /// monotonically, and emits one transition event after the lock drops.
    fn transition<F>(
        &self,
        id: u64,
        expected_version: Option<u64>,
        actor: &str,
        apply: F,
    ) -> Result<Escalation, EscalationError>
    where
        F: FnOnce(&mut Escalation) -> Result<bool, EscalationError>,
    {
        let record = self.record(id)?;
        let mut record = record.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(expected) = expected_version {
            if record.version != expected {
                return Err(EscalationError::Conflict {
                    id,
                    expected,
                    found: record.version,
                });
            }
        }

        let from = record.status;
        let short_circuit = apply(&mut record)?;
        record.updated_at_ms = now_ms().max(record.updated_at_ms);
        record.version += 1;
        let snapshot = record.clone();
        drop(record);

        debug!(
            escalation_id = id,
            from = from.as_str(),
            to = snapshot.status.as_str(),
            actor,
            short_circuit,
            "escalation transition"
        );
        self.dispatcher
            .emit_escalation_transition(&EscalationTransitionEvent {
                escalation_id: id,
                content_id: snapshot.content_id.clone(),
                from_status: from.as_str().to_string(),
                to_status: snapshot.status.as_str().to_string(),
                actor: actor.to_string(),
                short_circuit,
                timestamp_ms: snapshot.updated_at_ms,
            });

        Ok(snapshot)
    }

    fn record(&self, id: u64) -> Result<Arc<Mutex<Escalation>>, EscalationError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .get(&id)
            .cloned()
            .ok_or(EscalationError::NotFound { id })
    }

    fn sla_for(&self, priority: Priority) -> String {
        match priority {
            Priority::Critical => self.config.effective_critical_sla(),
            Priority::High => self.config.effective_high_sla(),
            Priority::Medium => self.config.effective_medium_sla(),
            Priority::Low => self.config.effective_low_sla(),
        }
    }
}
