//! RSVP admission control
//!
//! Eligibility is one ordered pipeline over data fetched up front; the first
//! failing rule is reported. The store's insert repeats the status, capacity
//! and uniqueness checks atomically, so a request that passes here can still
//! be refused if another one raced it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::database::store::{EventStore, RegistrationStore, UserStore};
use crate::models::{Event, EventStatus, NewRegistration, Registration, RsvpStatus};
use crate::services::conflicts::ScheduleConflictIndex;
use crate::services::notification::NotificationDispatcher;
use crate::utils::clock::Clock;
use crate::utils::errors::{EventOrganizerError, RegistrationRejection, Result};
use crate::utils::logging::{log_notification_failure, log_registration_action};

/// Everything the eligibility rules look at
#[derive(Debug, Clone, Copy)]
pub struct AdmissionContext<'a> {
    pub event: &'a Event,
    pub now: DateTime<Utc>,
    pub existing: Option<&'a Registration>,
    pub going_count: i64,
    /// The user's other "going" events overlapping this one
    pub conflicts: &'a [Event],
}

/// Evaluate the admission rules in order, short-circuiting on the first failure
pub fn check_eligibility(ctx: &AdmissionContext<'_>) -> std::result::Result<(), RegistrationRejection> {
    match ctx.event.status {
        EventStatus::Published => {}
        EventStatus::Draft => return Err(RegistrationRejection::NotPublished),
        EventStatus::Cancelled => return Err(RegistrationRejection::Cancelled),
        EventStatus::Archived => return Err(RegistrationRejection::Archived),
    }

    if ctx.event.has_started(ctx.now) {
        return Err(RegistrationRejection::AlreadyStarted);
    }

    if ctx.existing.is_some() {
        return Err(RegistrationRejection::AlreadyRegistered);
    }

    if let Some(capacity) = ctx.event.capacity {
        if ctx.going_count >= i64::from(capacity) {
            return Err(RegistrationRejection::CapacityFull);
        }
    }

    if let Some(conflict) = ctx.conflicts.first() {
        return Err(RegistrationRejection::TimeConflict {
            title: conflict.title.clone(),
        });
    }

    Ok(())
}

#[derive(Clone)]
pub struct AdmissionController {
    users: Arc<dyn UserStore>,
    events: Arc<dyn EventStore>,
    registrations: Arc<dyn RegistrationStore>,
    conflicts: ScheduleConflictIndex,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl AdmissionController {
    pub fn new(
        users: Arc<dyn UserStore>,
        events: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            conflicts: ScheduleConflictIndex::new(registrations.clone()),
            users,
            events,
            registrations,
            dispatcher,
            clock,
        }
    }

    /// Whether `user_id` may register for `event_id` right now
    pub async fn can_register(&self, user_id: i64, event_id: i64) -> Result<()> {
        let event = self.load_event(event_id).await?;
        self.check(user_id, &event).await
    }

    /// Create a "going" registration and notify the organizer
    pub async fn register(&self, user_id: i64, event_id: i64) -> Result<Registration> {
        let event = self.load_event(event_id).await?;
        self.check(user_id, &event).await?;

        let registration = self
            .registrations
            .insert_registration(NewRegistration {
                user_id,
                event_id,
                status: RsvpStatus::Going,
            })
            .await
            .map_err(|e| {
                if let Some(reason) = e.reason() {
                    log_registration_action(event_id, user_id, "register", Some(&reason));
                }
                e
            })?;
        log_registration_action(event_id, user_id, "register", None);

        if let Err(e) = self.dispatcher.on_registration_created(&event, &registration).await {
            log_notification_failure(event_id, "rsvp_confirmed", &e);
        }

        Ok(registration)
    }

    /// Delete the user's registration and notify the organizer
    pub async fn cancel_registration(&self, user_id: i64, event_id: i64) -> Result<Registration> {
        let event = self.load_event(event_id).await?;
        let registration = self
            .registrations
            .delete_registration(user_id, event_id)
            .await?
            .ok_or(EventOrganizerError::RegistrationNotFound { user_id, event_id })?;
        log_registration_action(event_id, user_id, "cancel", None);

        if let Err(e) = self.dispatcher.on_registration_cancelled(&event, &registration).await {
            log_notification_failure(event_id, "rsvp_cancelled", &e);
        }

        Ok(registration)
    }

    async fn load_event(&self, event_id: i64) -> Result<Event> {
        self.events
            .find_event(event_id)
            .await?
            .ok_or(EventOrganizerError::EventNotFound { event_id })
    }

    async fn check(&self, user_id: i64, event: &Event) -> Result<()> {
        if self.users.find_user(user_id).await?.is_none() {
            return Err(EventOrganizerError::UserNotFound { user_id });
        }

        let existing = self.registrations.find_registration(user_id, event.id).await?;
        let going_count = self.registrations.count_going(event.id).await?;
        let conflicts = self.conflicts.conflicting_registrations(user_id, event).await?;

        let ctx = AdmissionContext {
            event,
            now: self.clock.now(),
            existing: existing.as_ref(),
            going_count,
            conflicts: &conflicts,
        };

        check_eligibility(&ctx).map_err(|rejection| {
            log_registration_action(event.id, user_id, "register", Some(&rejection.to_string()));
            rejection.into()
        })
    }
}
