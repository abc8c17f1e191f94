//! Persistence traits consumed by the services
//!
//! The services only talk to storage through these traits. The Postgres
//! repositories implement them for production and [`super::memory::MemoryStore`]
//! implements them in-process with the same uniqueness and atomicity rules.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    CreateEventRequest, CreateUserRequest, Event, EventChanges, EventStatus, NewNotification,
    NewRegistration, NewReview, Notification, RatingSummary, Registration, Review, User,
};
use crate::utils::errors::Result;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User>;

    async fn find_user(&self, id: i64) -> Result<Option<User>>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event>;

    async fn find_event(&self, id: i64) -> Result<Option<Event>>;

    /// Writes the set fields of `changes` if the stored event is still editable
    ///
    /// `None` if the event does not exist or has left draft/published.
    async fn update_event(&self, id: i64, changes: &EventChanges) -> Result<Option<Event>>;

    /// Moves the event to `new` only if its stored status is still `expected`
    ///
    /// Returns `None` when the status has moved on (or the event is gone), so
    /// two racing writers can never both succeed.
    async fn compare_and_set_status(
        &self,
        id: i64,
        expected: EventStatus,
        new: EventStatus,
    ) -> Result<Option<Event>>;

    /// Bulk move of every published event with `ends_at < now` to archived
    async fn archive_ended(&self, now: DateTime<Utc>) -> Result<u64>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn find_registration(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>>;

    async fn count_going(&self, event_id: i64) -> Result<i64>;

    /// Events the user holds a "going" registration for, ordered by start time
    async fn going_events_for_user(&self, user_id: i64) -> Result<Vec<Event>>;

    /// Users holding a "going" registration for the event
    async fn going_participant_ids(&self, event_id: i64) -> Result<Vec<i64>>;

    /// Inserts a registration atomically with respect to the event row
    ///
    /// While holding the event, re-checks in admission order: the event is
    /// published, the user is not already registered, the event is below
    /// capacity. The unique (user, event) constraint backs up the duplicate
    /// check. Failures come back as registration rejections.
    async fn insert_registration(&self, registration: NewRegistration) -> Result<Registration>;

    /// Deletes and returns the registration, `None` if there was none
    async fn delete_registration(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Bulk insert; returns the number of rows written
    async fn insert_notifications(&self, notifications: &[NewNotification]) -> Result<u64>;

    /// Newest first
    async fn notifications_for(&self, recipient_id: i64, unread_only: bool) -> Result<Vec<Notification>>;

    async fn count_unread(&self, recipient_id: i64) -> Result<i64>;

    /// `false` if the notification does not exist or belongs to someone else
    async fn mark_read(&self, recipient_id: i64, notification_id: i64) -> Result<bool>;

    async fn mark_all_read(&self, recipient_id: i64) -> Result<u64>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Duplicate (user, event) pairs come back as `ReviewRejection::AlreadyReviewed`
    async fn insert_review(&self, review: NewReview) -> Result<Review>;

    /// Newest first
    async fn reviews_for_event(&self, event_id: i64) -> Result<Vec<Review>>;

    async fn rating_summary(&self, event_id: i64) -> Result<RatingSummary>;
}

/// Trait objects for every store, shared by the services
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub events: Arc<dyn EventStore>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub reviews: Arc<dyn ReviewStore>,
}

impl Stores {
    /// Uses one backend for every store
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: UserStore + EventStore + RegistrationStore + NotificationStore + ReviewStore + 'static,
    {
        Self {
            users: store.clone(),
            events: store.clone(),
            registrations: store.clone(),
            notifications: store.clone(),
            reviews: store,
        }
    }
}
