//! Store wrappers that inject failures or interleavings into the MemoryStore

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use event_organizer::database::{EventStore, MemoryStore, NotificationStore};
use event_organizer::models::{CreateEventRequest, Event, EventChanges, EventStatus, NewNotification, Notification};
use event_organizer::Result;

/// Every bulk insert fails as if the pool were exhausted
pub struct FailingNotifications {
    pub inner: Arc<MemoryStore>,
}

#[async_trait]
impl NotificationStore for FailingNotifications {
    async fn insert_notifications(&self, _notifications: &[NewNotification]) -> Result<u64> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn notifications_for(&self, recipient_id: i64, unread_only: bool) -> Result<Vec<Notification>> {
        self.inner.notifications_for(recipient_id, unread_only).await
    }

    async fn count_unread(&self, recipient_id: i64) -> Result<i64> {
        self.inner.count_unread(recipient_id).await
    }

    async fn mark_read(&self, recipient_id: i64, notification_id: i64) -> Result<bool> {
        self.inner.mark_read(recipient_id, notification_id).await
    }

    async fn mark_all_read(&self, recipient_id: i64) -> Result<u64> {
        self.inner.mark_all_read(recipient_id).await
    }
}

/// Commits a cancellation right before each edit reaches the store
pub struct CancelBeforeEdit {
    pub inner: Arc<MemoryStore>,
}

#[async_trait]
impl EventStore for CancelBeforeEdit {
    async fn create_event(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event> {
        self.inner.create_event(organizer_id, request).await
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>> {
        self.inner.find_event(id).await
    }

    async fn update_event(&self, id: i64, changes: &EventChanges) -> Result<Option<Event>> {
        self.inner
            .compare_and_set_status(id, EventStatus::Published, EventStatus::Cancelled)
            .await?;
        self.inner.update_event(id, changes).await
    }

    async fn compare_and_set_status(&self, id: i64, expected: EventStatus, new: EventStatus) -> Result<Option<Event>> {
        self.inner.compare_and_set_status(id, expected, new).await
    }

    async fn archive_ended(&self, now: DateTime<Utc>) -> Result<u64> {
        self.inner.archive_ended(now).await
    }
}
