//! Reviews left after an event has ended

mod helpers;

use assert_matches::assert_matches;
use chrono::Duration;
use event_organizer::models::{Event, NewReviewRequest, User};
use event_organizer::{EventOrganizerError, ReviewRejection};
use helpers::*;

fn review(rating: i16, comment: &str) -> NewReviewRequest {
    NewReviewRequest {
        rating,
        comment: comment.to_string(),
        image: None,
    }
}

async fn ended_event_with_guests(ctx: &TestContext, names: &[&str]) -> (Event, Vec<User>) {
    let organizer = ctx.create_user("organizer").await;
    let event = ctx.create_event(&organizer, published_event("Tasting", 2, 2)).await;
    let mut guests = Vec::new();
    for name in names {
        let guest = ctx.create_user(name).await;
        ctx.services.admission.register(guest.id, event.id).await.unwrap();
        guests.push(guest);
    }
    ctx.advance(Duration::hours(5));
    (event, guests)
}

#[tokio::test]
async fn test_participant_reviews_once() {
    let ctx = TestContext::new();
    let (event, guests) = ended_event_with_guests(&ctx, &["ira"]).await;

    let created = ctx
        .services
        .reviews
        .leave_review(guests[0].id, event.id, review(5, "Lovely evening"))
        .await
        .unwrap();
    assert_eq!(created.rating, 5);
    assert_eq!(created.comment, "Lovely evening");

    assert_matches!(
        ctx.services.reviews.leave_review(guests[0].id, event.id, review(3, "Changed my mind")).await,
        Err(EventOrganizerError::Review(ReviewRejection::AlreadyReviewed))
    );
}

#[tokio::test]
async fn test_rating_must_be_in_range() {
    let ctx = TestContext::new();
    let (event, guests) = ended_event_with_guests(&ctx, &["ira"]).await;

    for rating in [0, 6, -1] {
        assert_matches!(
            ctx.services.reviews.leave_review(guests[0].id, event.id, review(rating, "")).await,
            Err(EventOrganizerError::Review(ReviewRejection::InvalidRating { .. }))
        );
    }
}

#[tokio::test]
async fn test_event_must_have_ended() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let guest = ctx.create_user("guest").await;
    let event = ctx.create_event(&organizer, published_event("Future", 2, 2)).await;
    ctx.services.admission.register(guest.id, event.id).await.unwrap();

    assert_matches!(
        ctx.services.reviews.leave_review(guest.id, event.id, review(4, "")).await,
        Err(EventOrganizerError::Review(ReviewRejection::EventNotEnded))
    );
}

#[tokio::test]
async fn test_only_registered_users_review() {
    let ctx = TestContext::new();
    let (event, _) = ended_event_with_guests(&ctx, &["ira"]).await;
    let outsider = ctx.create_user("outsider").await;

    let err = ctx
        .services
        .reviews
        .leave_review(outsider.id, event.id, review(2, "Never went"))
        .await
        .unwrap_err();
    assert_matches!(err, EventOrganizerError::Review(ReviewRejection::NotRegistered));
    assert_eq!(err.reason().as_deref(), Some("Only registered participants can review this event"));
}

#[tokio::test]
async fn test_rating_summary_and_listing() {
    let ctx = TestContext::new();
    let (event, guests) = ended_event_with_guests(&ctx, &["a", "b", "c"]).await;

    let empty = ctx.services.reviews.rating_summary(event.id).await.unwrap();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.average, None);

    for (guest, rating) in guests.iter().zip([5, 4, 3]) {
        ctx.services
            .reviews
            .leave_review(guest.id, event.id, review(rating, "ok"))
            .await
            .unwrap();
    }

    let summary = ctx.services.reviews.rating_summary(event.id).await.unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.average, Some(4.0));

    let listed = ctx.services.reviews.reviews_for_event(event.id).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].user_id, guests[2].id);
}
