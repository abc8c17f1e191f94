//! Post-event reviews

use std::sync::Arc;

use tracing::info;

use crate::database::store::{EventStore, RegistrationStore, ReviewStore};
use crate::models::{NewReview, NewReviewRequest, RatingSummary, Review};
use crate::utils::clock::Clock;
use crate::utils::errors::{EventOrganizerError, Result, ReviewRejection};

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Clone)]
pub struct ReviewService {
    events: Arc<dyn EventStore>,
    registrations: Arc<dyn RegistrationStore>,
    reviews: Arc<dyn ReviewStore>,
    clock: Arc<dyn Clock>,
}

impl ReviewService {
    pub fn new(
        events: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
        reviews: Arc<dyn ReviewStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            registrations,
            reviews,
            clock,
        }
    }

    /// Leave a review for an ended event the user registered for
    pub async fn leave_review(&self, user_id: i64, event_id: i64, request: NewReviewRequest) -> Result<Review> {
        let event = self
            .events
            .find_event(event_id)
            .await?
            .ok_or(EventOrganizerError::EventNotFound { event_id })?;

        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(ReviewRejection::InvalidRating { rating: request.rating }.into());
        }

        if !event.has_ended(self.clock.now()) {
            return Err(ReviewRejection::EventNotEnded.into());
        }

        if self.registrations.find_registration(user_id, event_id).await?.is_none() {
            return Err(ReviewRejection::NotRegistered.into());
        }

        let review = self
            .reviews
            .insert_review(NewReview {
                event_id,
                user_id,
                rating: request.rating,
                comment: request.comment,
                image: request.image,
            })
            .await?;

        info!(event_id = event_id, user_id = user_id, rating = review.rating, "Review created");
        Ok(review)
    }

    /// Newest first
    pub async fn reviews_for_event(&self, event_id: i64) -> Result<Vec<Review>> {
        self.reviews.reviews_for_event(event_id).await
    }

    pub async fn rating_summary(&self, event_id: i64) -> Result<RatingSummary> {
        self.reviews.rating_summary(event_id).await
    }
}
