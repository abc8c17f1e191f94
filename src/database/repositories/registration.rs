//! Registration (RSVP) repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use crate::database::store::RegistrationStore;
use crate::models::event::{Event, EventStatus};
use crate::models::registration::{Registration, NewRegistration, RsvpStatus};
use crate::utils::errors::{EventOrganizerError, RegistrationRejection};

#[derive(Clone, Debug)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's registration for an event
    pub async fn find(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>, EventOrganizerError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, user_id, event_id, status, created_at FROM registrations WHERE user_id = $1 AND event_id = $2"
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Count "going" registrations for an event
    pub async fn count_going_for_event(&self, event_id: i64) -> Result<i64, EventOrganizerError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = 'going'"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Events the user is going to, earliest first
    pub async fn get_user_events(&self, user_id: i64) -> Result<Vec<Event>, EventOrganizerError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.latitude, e.longitude,
                   e.starts_at, e.ends_at, e.status, e.capacity, e.category,
                   e.organizer_id, e.created_at, e.updated_at
            FROM events e
            INNER JOIN registrations r ON e.id = r.event_id
            WHERE r.user_id = $1 AND r.status = 'going'
            ORDER BY e.starts_at ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// IDs of users going to an event
    pub async fn get_participant_ids(&self, event_id: i64) -> Result<Vec<i64>, EventOrganizerError> {
        let ids: Vec<(i64,)> = sqlx::query_as(
            "SELECT user_id FROM registrations WHERE event_id = $1 AND status = 'going' ORDER BY created_at ASC, id ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Register a user while holding a lock on the event row
    pub async fn register(&self, request: NewRegistration) -> Result<Registration, EventOrganizerError> {
        let mut tx = self.pool.begin().await?;

        let event: Option<(EventStatus, Option<i32>)> = sqlx::query_as(
            "SELECT status, capacity FROM events WHERE id = $1 FOR UPDATE"
        )
        .bind(request.event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (status, capacity) = event.ok_or(EventOrganizerError::EventNotFound { event_id: request.event_id })?;

        match status {
            EventStatus::Published => {}
            EventStatus::Draft => return Err(RegistrationRejection::NotPublished.into()),
            EventStatus::Cancelled => return Err(RegistrationRejection::Cancelled.into()),
            EventStatus::Archived => return Err(RegistrationRejection::Archived.into()),
        }

        let existing: Option<(i32,)> = sqlx::query_as(
            "SELECT 1 FROM registrations WHERE user_id = $1 AND event_id = $2"
        )
        .bind(request.user_id)
        .bind(request.event_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(RegistrationRejection::AlreadyRegistered.into());
        }

        if let (Some(capacity), RsvpStatus::Going) = (capacity, request.status) {
            let going: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = 'going'"
            )
            .bind(request.event_id)
            .fetch_one(&mut *tx)
            .await?;

            if going.0 >= i64::from(capacity) {
                return Err(RegistrationRejection::CapacityFull.into());
            }
        }

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (user_id, event_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, event_id) DO NOTHING
            RETURNING id, user_id, event_id, status, created_at
            "#
        )
        .bind(request.user_id)
        .bind(request.event_id)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RegistrationRejection::AlreadyRegistered)?;

        tx.commit().await?;
        Ok(registration)
    }

    /// Remove a user's registration
    pub async fn delete(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>, EventOrganizerError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            DELETE FROM registrations
            WHERE user_id = $1 AND event_id = $2
            RETURNING id, user_id, event_id, status, created_at
            "#
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn find_registration(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>, EventOrganizerError> {
        self.find(user_id, event_id).await
    }

    async fn count_going(&self, event_id: i64) -> Result<i64, EventOrganizerError> {
        self.count_going_for_event(event_id).await
    }

    async fn going_events_for_user(&self, user_id: i64) -> Result<Vec<Event>, EventOrganizerError> {
        self.get_user_events(user_id).await
    }

    async fn going_participant_ids(&self, event_id: i64) -> Result<Vec<i64>, EventOrganizerError> {
        self.get_participant_ids(event_id).await
    }

    async fn insert_registration(&self, registration: NewRegistration) -> Result<Registration, EventOrganizerError> {
        self.register(registration).await
    }

    async fn delete_registration(&self, user_id: i64, event_id: i64) -> Result<Option<Registration>, EventOrganizerError> {
        self.delete(user_id, event_id).await
    }
}
