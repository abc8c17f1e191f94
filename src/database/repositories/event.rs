//! Event repository implementation

use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::database::store::EventStore;
use crate::models::event::{Event, EventStatus, CreateEventRequest, EventChanges};
use crate::utils::errors::EventOrganizerError;
use crate::utils::logging::log_database_operation;

const EVENT_COLUMNS: &str = "id, title, description, location, latitude, longitude, starts_at, ends_at, status, capacity, category, organizer_id, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event, EventOrganizerError> {
        let now = Utc::now();
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, description, location, latitude, longitude, starts_at, ends_at, status, capacity, category, organizer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(request.title)
        .bind(request.description)
        .bind(request.location)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.status)
        .bind(request.capacity)
        .bind(request.category)
        .bind(organizer_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventOrganizerError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update the editable fields of an event that is still draft or published
    pub async fn update(&self, id: i64, changes: &EventChanges) -> Result<Option<Event>, EventOrganizerError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                starts_at = COALESCE($7, starts_at),
                ends_at = COALESCE($8, ends_at),
                capacity = COALESCE($9, capacity),
                category = COALESCE($10, category),
                updated_at = $11
            WHERE id = $1 AND status IN ('draft', 'published')
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.location.as_deref())
        .bind(changes.latitude)
        .bind(changes.longitude)
        .bind(changes.starts_at)
        .bind(changes.ends_at)
        .bind(changes.capacity)
        .bind(changes.category.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Conditional status write; the row lock taken by UPDATE serializes racing writers
    pub async fn update_status_if(&self, id: i64, expected: EventStatus, new: EventStatus) -> Result<Option<Event>, EventOrganizerError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET status = $3,
                updated_at = $4
            WHERE id = $1 AND status = $2
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected)
        .bind(new)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Archive every published event that ended before `now`
    pub async fn archive_ended_before(&self, now: DateTime<Utc>) -> Result<u64, EventOrganizerError> {
        let started = Instant::now();
        let result = sqlx::query(
            r#"
            UPDATE events
            SET status = 'archived',
                updated_at = $2
            WHERE status = 'published' AND ends_at < $1
            "#
        )
        .bind(now)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        log_database_operation("archive_ended", "events", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?.rows_affected())
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn create_event(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event, EventOrganizerError> {
        self.create(organizer_id, request).await
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>, EventOrganizerError> {
        self.find_by_id(id).await
    }

    async fn update_event(&self, id: i64, changes: &EventChanges) -> Result<Option<Event>, EventOrganizerError> {
        self.update(id, changes).await
    }

    async fn compare_and_set_status(
        &self,
        id: i64,
        expected: EventStatus,
        new: EventStatus,
    ) -> Result<Option<Event>, EventOrganizerError> {
        self.update_status_if(id, expected, new).await
    }

    async fn archive_ended(&self, now: DateTime<Utc>) -> Result<u64, EventOrganizerError> {
        self.archive_ended_before(now).await
    }
}
