//! Event service implementation
//!
//! The explicit mutation path for events: creation, edits and status changes.
//! Each operation fetches the event once, checks the actor, validates, writes,
//! and then calls the notification dispatcher directly.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::database::store::{EventStore, UserStore};
use crate::lifecycle::{self, EventAction};
use crate::models::{CreateEventRequest, Event, EventChanges, EventSnapshot, EventStatus};
use crate::services::archive::{apply_transition, ArchivalSweep};
use crate::services::notification::NotificationDispatcher;
use crate::utils::clock::Clock;
use crate::utils::errors::{EventOrganizerError, LifecycleRejection, Result};
use crate::utils::logging::{log_event_action, log_notification_failure};

/// An edited event and how many participants were told about it
#[derive(Debug, Clone)]
pub struct EventUpdate {
    pub event: Event,
    pub notified: usize,
}

#[derive(Clone)]
pub struct EventService {
    users: Arc<dyn UserStore>,
    events: Arc<dyn EventStore>,
    dispatcher: NotificationDispatcher,
    sweep: ArchivalSweep,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(
        users: Arc<dyn UserStore>,
        events: Arc<dyn EventStore>,
        dispatcher: NotificationDispatcher,
        sweep: ArchivalSweep,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            events,
            dispatcher,
            sweep,
            clock,
        }
    }

    /// Create an event owned by `organizer_id`, as a draft or already published
    pub async fn create_event(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event> {
        if self.users.find_user(organizer_id).await?.is_none() {
            return Err(EventOrganizerError::UserNotFound { user_id: organizer_id });
        }

        validate_fields(
            &request.title,
            request.starts_at,
            request.ends_at,
            request.capacity,
            request.latitude,
            request.longitude,
        )?;
        if !matches!(request.status, EventStatus::Draft | EventStatus::Published) {
            return Err(EventOrganizerError::InvalidInput(format!(
                "Events cannot be created in status '{}'",
                request.status
            )));
        }

        let event = self.events.create_event(organizer_id, request).await?;
        log_event_action(event.id, "create", Some(organizer_id), Some(event.status.as_str()));
        Ok(event)
    }

    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        self.events
            .find_event(event_id)
            .await?
            .ok_or(EventOrganizerError::EventNotFound { event_id })
    }

    /// Apply `changes` and notify participants about what they can see changed
    pub async fn update_event(&self, actor_id: i64, event_id: i64, changes: EventChanges) -> Result<EventUpdate> {
        let event = self.get_event(event_id).await?;
        self.authorize(actor_id, &event).await?;

        if !lifecycle::can_edit(&event) {
            return Err(LifecycleRejection::NotEditable { status: event.status }.into());
        }

        let preview = changes.apply_to(&event);
        validate_fields(
            &preview.title,
            preview.starts_at,
            preview.ends_at,
            preview.capacity,
            preview.latitude,
            preview.longitude,
        )?;

        let snapshot = EventSnapshot::capture(&event);
        let updated = match self.events.update_event(event_id, &changes).await? {
            Some(updated) => updated,
            None => {
                // status moved on since the read above
                let current = self.get_event(event_id).await?;
                debug!(event_id, status = %current.status, "Edit lost to a status change");
                return Err(LifecycleRejection::NotEditable { status: current.status }.into());
            }
        };
        log_event_action(event_id, "update", Some(actor_id), None);

        let notified = match self.dispatcher.on_event_updated(&updated, &snapshot).await {
            Ok(count) => count,
            Err(e) => {
                log_notification_failure(event_id, "event_updated", &e);
                0
            }
        };

        Ok(EventUpdate { event: updated, notified })
    }

    /// Move the event to `target` on behalf of its organizer or a staff user
    pub async fn transition(&self, actor_id: i64, event_id: i64, target: EventStatus) -> Result<Event> {
        let event = self.get_event(event_id).await?;
        self.authorize(actor_id, &event).await?;
        self.transition_loaded(actor_id, &event, target).await
    }

    pub async fn publish(&self, actor_id: i64, event_id: i64) -> Result<Event> {
        self.transition(actor_id, event_id, EventStatus::Published).await
    }

    pub async fn cancel(&self, actor_id: i64, event_id: i64) -> Result<Event> {
        self.transition(actor_id, event_id, EventStatus::Cancelled).await
    }

    /// Organizer-initiated archival of an ended event
    pub async fn archive(&self, actor_id: i64, event_id: i64) -> Result<Event> {
        let event = self.get_event(event_id).await?;
        self.authorize(actor_id, &event).await?;
        let archived = self.sweep.archive_one(&event).await?;
        log_event_action(event_id, "archive", Some(actor_id), None);
        Ok(archived)
    }

    /// Actions a client may offer for the event at this moment
    pub async fn available_actions(&self, event_id: i64) -> Result<Vec<EventAction>> {
        let event = self.get_event(event_id).await?;
        Ok(lifecycle::available_actions(&event, self.clock.now()))
    }

    async fn transition_loaded(&self, actor_id: i64, event: &Event, target: EventStatus) -> Result<Event> {
        let outcome = apply_transition(self.events.as_ref(), event, target, self.clock.as_ref()).await?;
        if !outcome.changed {
            debug!(event_id = event.id, status = %target, "Status unchanged; nothing to do");
            return Ok(outcome.event);
        }

        log_event_action(
            event.id,
            "transition",
            Some(actor_id),
            Some(&format!("{} -> {}", event.status, target)),
        );

        if target == EventStatus::Cancelled {
            match self.dispatcher.on_event_cancelled(&outcome.event).await {
                Ok(count) => info!(event_id = event.id, notified = count, "Cancellation announced"),
                Err(e) => log_notification_failure(event.id, "event_cancelled", &e),
            }
        }

        Ok(outcome.event)
    }

    async fn authorize(&self, actor_id: i64, event: &Event) -> Result<()> {
        let actor = self
            .users
            .find_user(actor_id)
            .await?
            .ok_or(EventOrganizerError::UserNotFound { user_id: actor_id })?;

        if actor.id != event.organizer_id && !actor.is_staff {
            return Err(EventOrganizerError::PermissionDenied(format!(
                "User {} does not organize event {}",
                actor_id, event.id
            )));
        }
        Ok(())
    }
}

/// Field rules shared by creation and edits
fn validate_fields(
    title: &str,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    capacity: Option<i32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(EventOrganizerError::InvalidInput("Title is required".to_string()));
    }

    if ends_at <= starts_at {
        return Err(EventOrganizerError::InvalidInput(
            "End time must be after start time".to_string(),
        ));
    }

    if let Some(capacity) = capacity {
        if capacity <= 0 {
            return Err(EventOrganizerError::InvalidInput(format!(
                "Capacity must be positive, got {}",
                capacity
            )));
        }
    }

    if let Some(latitude) = latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EventOrganizerError::InvalidInput(format!("Latitude out of range: {}", latitude)));
        }
    }
    if let Some(longitude) = longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(EventOrganizerError::InvalidInput(format!("Longitude out of range: {}", longitude)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 9, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_fields_pass() {
        assert!(validate_fields("Meetup", start(), start() + Duration::hours(1), Some(5), Some(50.45), Some(30.52)).is_ok());
        assert!(validate_fields("Meetup", start(), start() + Duration::hours(1), None, None, None).is_ok());
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let end = start() + Duration::hours(1);
        assert!(validate_fields("   ", start(), end, None, None, None).is_err());
        assert!(validate_fields("Meetup", start(), start(), None, None, None).is_err());
        assert!(validate_fields("Meetup", start(), end, Some(0), None, None).is_err());
        assert!(validate_fields("Meetup", start(), end, None, Some(91.0), None).is_err());
        assert!(validate_fields("Meetup", start(), end, None, None, Some(-180.5)).is_err());
    }
}
