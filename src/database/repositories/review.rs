//! Review repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use crate::database::store::ReviewStore;
use crate::models::review::{Review, NewReview, RatingSummary};
use crate::utils::errors::{EventOrganizerError, ReviewRejection};

#[derive(Clone, Debug)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a review; one per user and event
    pub async fn create(&self, request: NewReview) -> Result<Review, EventOrganizerError> {
        let now = Utc::now();
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (event_id, user_id, rating, comment, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (event_id, user_id) DO NOTHING
            RETURNING id, event_id, user_id, rating, comment, image, created_at, updated_at
            "#
        )
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(request.rating)
        .bind(request.comment)
        .bind(request.image)
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ReviewRejection::AlreadyReviewed)?;

        Ok(review)
    }

    /// Get reviews for an event, newest first
    pub async fn get_event_reviews(&self, event_id: i64) -> Result<Vec<Review>, EventOrganizerError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, event_id, user_id, rating, comment, image, created_at, updated_at
            FROM reviews
            WHERE event_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    pub async fn get_rating_summary(&self, event_id: i64) -> Result<RatingSummary, EventOrganizerError> {
        let (count, average): (i64, Option<f64>) = sqlx::query_as(
            "SELECT COUNT(*), AVG(rating)::float8 FROM reviews WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(RatingSummary { count, average })
    }
}

#[async_trait]
impl ReviewStore for ReviewRepository {
    async fn insert_review(&self, review: NewReview) -> Result<Review, EventOrganizerError> {
        self.create(review).await
    }

    async fn reviews_for_event(&self, event_id: i64) -> Result<Vec<Review>, EventOrganizerError> {
        self.get_event_reviews(event_id).await
    }

    async fn rating_summary(&self, event_id: i64) -> Result<RatingSummary, EventOrganizerError> {
        self.get_rating_summary(event_id).await
    }
}
