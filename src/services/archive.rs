//! Archival of ended events
//!
//! The sweep moves every published event whose end has passed to archived in
//! one bulk write. It skips per-event validation (that subset of the
//! transition table is always legal) and sends no notifications.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::database::store::EventStore;
use crate::lifecycle::validate_transition;
use crate::models::{Event, EventStatus};
use crate::utils::clock::Clock;
use crate::utils::errors::{EventOrganizerError, Result};
use crate::utils::logging::log_archive_sweep;

/// Result of a guarded status write
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub event: Event,
    /// `false` when the event already had the target status
    pub changed: bool,
}

/// Validate and write a status change with a compare-and-set on the current status
///
/// When another writer got there first, the fresh row is re-validated so the
/// caller sees the same reason a fresh request would. If the fresh row already
/// carries `target`, nothing is written and `changed` is `false`.
pub(crate) async fn apply_transition(
    events: &dyn EventStore,
    event: &Event,
    target: EventStatus,
    clock: &dyn Clock,
) -> Result<TransitionOutcome> {
    validate_transition(event, target, clock.now())?;
    if event.status == target {
        return Ok(TransitionOutcome { event: event.clone(), changed: false });
    }

    if let Some(updated) = events.compare_and_set_status(event.id, event.status, target).await? {
        return Ok(TransitionOutcome { event: updated, changed: true });
    }

    let fresh = events
        .find_event(event.id)
        .await?
        .ok_or(EventOrganizerError::EventNotFound { event_id: event.id })?;
    debug!(event_id = event.id, expected = %event.status, found = %fresh.status, "Lost status race");

    validate_transition(&fresh, target, clock.now())?;
    if fresh.status == target {
        return Ok(TransitionOutcome { event: fresh, changed: false });
    }

    Err(EventOrganizerError::ConcurrentModification { event_id: event.id })
}

#[derive(Clone)]
pub struct ArchivalSweep {
    events: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
}

impl ArchivalSweep {
    pub fn new(events: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    /// Archive every published event that has ended; returns how many moved
    pub async fn archive_past_events(&self) -> Result<u64> {
        let started = Instant::now();
        let archived = self.events.archive_ended(self.clock.now()).await?;
        log_archive_sweep(archived, started.elapsed().as_millis() as u64);
        Ok(archived)
    }

    /// Archive a single event through the transition validator
    pub async fn archive_one(&self, event: &Event) -> Result<Event> {
        let outcome = apply_transition(self.events.as_ref(), event, EventStatus::Archived, self.clock.as_ref()).await?;
        if outcome.changed {
            info!(event_id = event.id, "Event archived");
        }
        Ok(outcome.event)
    }
}
