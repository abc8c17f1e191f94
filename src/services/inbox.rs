//! Recipient-side notification operations

use std::sync::Arc;

use tracing::debug;

use crate::database::store::NotificationStore;
use crate::models::Notification;
use crate::utils::errors::{EventOrganizerError, Result};

#[derive(Clone)]
pub struct NotificationInbox {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationInbox {
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// A user's notifications, newest first
    pub async fn list(&self, user_id: i64, unread_only: bool) -> Result<Vec<Notification>> {
        self.notifications.notifications_for(user_id, unread_only).await
    }

    pub async fn unread_count(&self, user_id: i64) -> Result<i64> {
        self.notifications.count_unread(user_id).await
    }

    /// Mark one of the user's own notifications as read
    ///
    /// Someone else's notification is reported as not found.
    pub async fn mark_read(&self, user_id: i64, notification_id: i64) -> Result<()> {
        if !self.notifications.mark_read(user_id, notification_id).await? {
            return Err(EventOrganizerError::NotificationNotFound { notification_id });
        }
        debug!(user_id = user_id, notification_id = notification_id, "Notification marked read");
        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64> {
        let marked = self.notifications.mark_all_read(user_id).await?;
        debug!(user_id = user_id, marked = marked, "Notifications marked read");
        Ok(marked)
    }
}
