//! Status transition validation
//!
//! [`validate_transition`] is the authority on status changes. The UI-facing
//! [`available_actions`] is derived from the same table but only drives what a
//! caller may offer.

use chrono::{DateTime, Utc};

use super::state::{EventAction, EventState};
use crate::models::{Event, EventStatus};
use crate::utils::errors::LifecycleRejection;

/// Pure table lookup, ignoring the archive timing rule
pub fn can_transition(from: EventStatus, to: EventStatus) -> bool {
    EventState::of(from).allows(to)
}

/// Decide whether `event` may move to `target` at `now`
///
/// A same-status request always succeeds. Otherwise the table is consulted
/// first, so a draft that has already ended still reports the generic
/// "not possible" reason rather than the archive-specific one.
pub fn validate_transition(
    event: &Event,
    target: EventStatus,
    now: DateTime<Utc>,
) -> Result<(), LifecycleRejection> {
    if event.status == target {
        return Ok(());
    }

    if !can_transition(event.status, target) {
        return Err(LifecycleRejection::TransitionNotAllowed {
            from: event.status,
            to: target,
        });
    }

    if target == EventStatus::Archived
        && (event.status != EventStatus::Published || !event.has_ended(now))
    {
        return Err(LifecycleRejection::ArchiveRequiresEndedPublished);
    }

    Ok(())
}

/// Actions a caller may offer for `event`; archive only once it has ended
pub fn available_actions(event: &Event, now: DateTime<Utc>) -> Vec<EventAction> {
    let mut actions = EventState::of(event.status).actions();
    if !event.has_ended(now) {
        actions.retain(|action| *action != EventAction::Archive);
    }
    actions
}

pub fn can_edit(event: &Event) -> bool {
    EventState::of(event.status).can_edit
}

pub fn can_archive(event: &Event, now: DateTime<Utc>) -> bool {
    EventState::of(event.status).can_archive && event.has_ended(now)
}
