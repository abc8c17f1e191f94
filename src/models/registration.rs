//! Registration (RSVP) model

use std::fmt;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "rsvp_status", rename_all = "lowercase")]
pub enum RsvpStatus {
    /// Confirmed attendance; the only status counted toward capacity and conflicts
    Going,
    Cancelled,
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsvpStatus::Going => f.write_str("going"),
            RsvpStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub status: RsvpStatus,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn is_going(&self) -> bool {
        self.status == RsvpStatus::Going
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegistration {
    pub user_id: i64,
    pub event_id: i64,
    pub status: RsvpStatus,
}
