//! Notification repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use chrono::Utc;
use crate::database::store::NotificationStore;
use crate::models::notification::{Notification, NewNotification};
use crate::utils::errors::EventOrganizerError;

#[derive(Clone, Debug)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of notifications in a single statement
    pub async fn create_many(&self, notifications: &[NewNotification]) -> Result<u64, EventOrganizerError> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO notifications (recipient_id, event_id, notification_type, message, is_read, created_at) "
        );
        builder.push_values(notifications, |mut row, notification| {
            row.push_bind(notification.recipient_id)
                .push_bind(notification.event_id)
                .push_bind(notification.notification_type)
                .push_bind(&notification.message)
                .push_bind(false)
                .push_bind(now);
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Get a user's notifications, newest first
    pub async fn get_for_recipient(&self, recipient_id: i64, unread_only: bool) -> Result<Vec<Notification>, EventOrganizerError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, recipient_id, event_id, notification_type, message, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1 AND ($2 = FALSE OR is_read = FALSE)
            ORDER BY created_at DESC, id DESC
            "#
        )
        .bind(recipient_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn count_unread_for(&self, recipient_id: i64) -> Result<i64, EventOrganizerError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE"
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Mark one notification read, scoped to its recipient
    pub async fn mark_as_read(&self, recipient_id: i64, notification_id: i64) -> Result<bool, EventOrganizerError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_id = $2"
        )
        .bind(notification_id)
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_all_as_read(&self, recipient_id: i64) -> Result<u64, EventOrganizerError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND is_read = FALSE"
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert_notifications(&self, notifications: &[NewNotification]) -> Result<u64, EventOrganizerError> {
        self.create_many(notifications).await
    }

    async fn notifications_for(&self, recipient_id: i64, unread_only: bool) -> Result<Vec<Notification>, EventOrganizerError> {
        self.get_for_recipient(recipient_id, unread_only).await
    }

    async fn count_unread(&self, recipient_id: i64) -> Result<i64, EventOrganizerError> {
        self.count_unread_for(recipient_id).await
    }

    async fn mark_read(&self, recipient_id: i64, notification_id: i64) -> Result<bool, EventOrganizerError> {
        self.mark_as_read(recipient_id, notification_id).await
    }

    async fn mark_all_read(&self, recipient_id: i64) -> Result<u64, EventOrganizerError> {
        self.mark_all_as_read(recipient_id).await
    }
}
