//! Review model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub rating: i16,
    pub comment: String,
    /// Reference to an uploaded image, if any
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReviewRequest {
    pub rating: i16,
    pub comment: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub event_id: i64,
    pub user_id: i64,
    pub rating: i16,
    pub comment: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub count: i64,
    /// `None` when the event has no reviews
    pub average: Option<f64>,
}
