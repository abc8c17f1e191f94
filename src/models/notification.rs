//! Notification model

use std::fmt;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
pub enum NotificationType {
    EventUpdated,
    EventTimeChanged,
    EventLocationChanged,
    EventCancelled,
    RsvpConfirmed,
    RsvpCancelled,
}

impl NotificationType {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::EventUpdated => "Event updated",
            NotificationType::EventTimeChanged => "Event time changed",
            NotificationType::EventLocationChanged => "Event location changed",
            NotificationType::EventCancelled => "Event cancelled",
            NotificationType::RsvpConfirmed => "RSVP confirmed",
            NotificationType::RsvpCancelled => "RSVP cancelled",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub event_id: i64,
    pub notification_type: NotificationType,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub recipient_id: i64,
    pub event_id: i64,
    pub notification_type: NotificationType,
    pub message: String,
}
