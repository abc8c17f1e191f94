//! Event model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Archived,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Draft,
        EventStatus::Published,
        EventStatus::Cancelled,
        EventStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: EventStatus,
    /// `None` means unlimited
    pub capacity: Option<i32>,
    pub category: String,
    pub organizer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.ends_at < now
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }

    /// Strict overlap: events that only touch at a boundary do not overlap
    pub fn overlaps(&self, other: &Event) -> bool {
        self.starts_at < other.ends_at && self.ends_at > other.starts_at
    }
}

/// Values of the user-visible fields captured before an edit
///
/// Passed explicitly to the notification diff instead of being stashed on the
/// entity before it is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl EventSnapshot {
    pub fn capture(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            starts_at: event.starts_at,
            ends_at: event.ends_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: EventStatus,
    pub capacity: Option<i32>,
    pub category: String,
}

impl CreateEventRequest {
    /// A draft with no capacity limit; adjust with the `with_*` methods
    pub fn new(title: impl Into<String>, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            location: String::new(),
            latitude: None,
            longitude: None,
            starts_at,
            ends_at,
            status: EventStatus::Draft,
            capacity: None,
            category: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn published(mut self) -> Self {
        self.status = EventStatus::Published;
        self
    }
}

/// Partial update of an event's editable fields; `None` leaves a field as is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub category: Option<String>,
}

impl EventChanges {
    /// Applies the changes to a copy of `event`, for validation before the write
    pub fn apply_to(&self, event: &Event) -> Event {
        let mut updated = event.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        if let Some(location) = &self.location {
            updated.location = location.clone();
        }
        if self.latitude.is_some() {
            updated.latitude = self.latitude;
        }
        if self.longitude.is_some() {
            updated.longitude = self.longitude;
        }
        if let Some(starts_at) = self.starts_at {
            updated.starts_at = starts_at;
        }
        if let Some(ends_at) = self.ends_at {
            updated.ends_at = ends_at;
        }
        if self.capacity.is_some() {
            updated.capacity = self.capacity;
        }
        if let Some(category) = &self.category {
            updated.category = category.clone();
        }
        updated
    }
}
