//! In-process store
//!
//! Implements every store trait over a single mutex-guarded state, applying
//! the same uniqueness, capacity and status checks as the Postgres schema and
//! repositories. Used by the test suite and for running without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::database::store::{EventStore, NotificationStore, RegistrationStore, ReviewStore, UserStore};
use crate::lifecycle;
use crate::models::{
    CreateEventRequest, CreateUserRequest, Event, EventChanges, EventStatus, NewNotification,
    NewRegistration, NewReview, Notification, RatingSummary, Registration, Review, RsvpStatus, User,
};
use crate::utils::errors::{EventOrganizerError, RegistrationRejection, Result, ReviewRejection};

#[derive(Default)]
struct State {
    next_id: i64,
    users: HashMap<i64, User>,
    events: HashMap<i64, Event>,
    registrations: Vec<Registration>,
    notifications: Vec<Notification>,
    reviews: Vec<Review>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn going_count(&self, event_id: i64) -> i64 {
        self.registrations
            .iter()
            .filter(|r| r.event_id == event_id && r.is_going())
            .count() as i64
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.username == request.username) {
            return Err(EventOrganizerError::InvalidInput(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }

        let user = User {
            id: state.next_id(),
            username: request.username,
            email: request.email,
            is_staff: request.is_staff,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create_event(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let event = Event {
            id: state.next_id(),
            title: request.title,
            description: request.description,
            location: request.location,
            latitude: request.latitude,
            longitude: request.longitude,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            status: request.status,
            capacity: request.capacity,
            category: request.category,
            organizer_id,
            created_at: now,
            updated_at: now,
        };
        state.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        Ok(self.state.lock().await.events.get(&id).cloned())
    }

    async fn update_event(&self, id: i64, changes: &EventChanges) -> Result<Option<Event>> {
        let mut state = self.state.lock().await;
        Ok(state.events.get_mut(&id).filter(|event| lifecycle::can_edit(event)).map(|event| {
            *event = changes.apply_to(event);
            event.updated_at = Utc::now();
            event.clone()
        }))
    }

    async fn compare_and_set_status(
        &self,
        id: i64,
        expected: EventStatus,
        new: EventStatus,
    ) -> Result<Option<Event>> {
        let mut state = self.state.lock().await;
        Ok(state
            .events
            .get_mut(&id)
            .filter(|event| event.status == expected)
            .map(|event| {
                event.status = new;
                event.updated_at = Utc::now();
                event.clone()
            }))
    }

    async fn archive_ended(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut state = self.state.lock().await;
        let stamp = Utc::now();
        let mut archived = 0;
        for event in state.events.values_mut() {
            if event.status == EventStatus::Published && event.ends_at < now {
                event.status = EventStatus::Archived;
                event.updated_at = stamp;
                archived += 1;
            }
        }
        Ok(archived)
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn find_registration(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>> {
        let state = self.state.lock().await;
        Ok(state
            .registrations
            .iter()
            .find(|r| r.user_id == user_id && r.event_id == event_id)
            .cloned())
    }

    async fn count_going(&self, event_id: i64) -> Result<i64> {
        Ok(self.state.lock().await.going_count(event_id))
    }

    async fn going_events_for_user(&self, user_id: i64) -> Result<Vec<Event>> {
        let state = self.state.lock().await;
        let mut events: Vec<Event> = state
            .registrations
            .iter()
            .filter(|r| r.user_id == user_id && r.is_going())
            .filter_map(|r| state.events.get(&r.event_id).cloned())
            .collect();
        events.sort_by_key(|e| (e.starts_at, e.id));
        Ok(events)
    }

    async fn going_participant_ids(&self, event_id: i64) -> Result<Vec<i64>> {
        let state = self.state.lock().await;
        Ok(state
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id && r.is_going())
            .map(|r| r.user_id)
            .collect())
    }

    async fn insert_registration(&self, registration: NewRegistration) -> Result<Registration> {
        let mut state = self.state.lock().await;
        let event = state
            .events
            .get(&registration.event_id)
            .ok_or(EventOrganizerError::EventNotFound { event_id: registration.event_id })?;

        match event.status {
            EventStatus::Published => {}
            EventStatus::Draft => return Err(RegistrationRejection::NotPublished.into()),
            EventStatus::Cancelled => return Err(RegistrationRejection::Cancelled.into()),
            EventStatus::Archived => return Err(RegistrationRejection::Archived.into()),
        }

        if state
            .registrations
            .iter()
            .any(|r| r.user_id == registration.user_id && r.event_id == registration.event_id)
        {
            return Err(RegistrationRejection::AlreadyRegistered.into());
        }

        if let (Some(capacity), RsvpStatus::Going) = (event.capacity, registration.status) {
            if state.going_count(registration.event_id) >= i64::from(capacity) {
                return Err(RegistrationRejection::CapacityFull.into());
            }
        }

        let created = Registration {
            id: state.next_id(),
            user_id: registration.user_id,
            event_id: registration.event_id,
            status: registration.status,
            created_at: Utc::now(),
        };
        state.registrations.push(created.clone());
        Ok(created)
    }

    async fn delete_registration(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>> {
        let mut state = self.state.lock().await;
        let position = state
            .registrations
            .iter()
            .position(|r| r.user_id == user_id && r.event_id == event_id);
        Ok(position.map(|index| state.registrations.remove(index)))
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert_notifications(&self, notifications: &[NewNotification]) -> Result<u64> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        for notification in notifications {
            let id = state.next_id();
            state.notifications.push(Notification {
                id,
                recipient_id: notification.recipient_id,
                event_id: notification.event_id,
                notification_type: notification.notification_type,
                message: notification.message.clone(),
                is_read: false,
                created_at: now,
            });
        }
        Ok(notifications.len() as u64)
    }

    async fn notifications_for(&self, recipient_id: i64, unread_only: bool) -> Result<Vec<Notification>> {
        let state = self.state.lock().await;
        let mut found: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && (!unread_only || !n.is_read))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn count_unread(&self, recipient_id: i64) -> Result<i64> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, recipient_id: i64, notification_id: i64) -> Result<bool> {
        let mut state = self.state.lock().await;
        match state
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id && n.recipient_id == recipient_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient_id: i64) -> Result<u64> {
        let mut state = self.state.lock().await;
        let mut marked = 0;
        for notification in state
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
        {
            notification.is_read = true;
            marked += 1;
        }
        Ok(marked)
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn insert_review(&self, review: NewReview) -> Result<Review> {
        let mut state = self.state.lock().await;
        if state
            .reviews
            .iter()
            .any(|r| r.event_id == review.event_id && r.user_id == review.user_id)
        {
            return Err(ReviewRejection::AlreadyReviewed.into());
        }

        let now = Utc::now();
        let created = Review {
            id: state.next_id(),
            event_id: review.event_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            image: review.image,
            created_at: now,
            updated_at: now,
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn reviews_for_event(&self, event_id: i64) -> Result<Vec<Review>> {
        let state = self.state.lock().await;
        let mut found: Vec<Review> = state
            .reviews
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn rating_summary(&self, event_id: i64) -> Result<RatingSummary> {
        let state = self.state.lock().await;
        let ratings: Vec<f64> = state
            .reviews
            .iter()
            .filter(|r| r.event_id == event_id)
            .map(|r| f64::from(r.rating))
            .collect();
        let count = ratings.len() as i64;
        let average = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };
        Ok(RatingSummary { count, average })
    }
}
