//! Archival sweep and single-event archival

mod helpers;

use assert_matches::assert_matches;
use chrono::Duration;
use event_organizer::models::EventStatus;
use event_organizer::{EventOrganizerError, LifecycleRejection};
use helpers::*;

#[tokio::test]
async fn test_sweep_is_idempotent_and_selective() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let guest = ctx.create_user("guest").await;

    let ended_one = ctx.create_event(&organizer, published_event("Ended 1", 1, 1)).await;
    let ended_two = ctx.create_event(&organizer, published_event("Ended 2", 2, 1)).await;
    let running = ctx.create_event(&organizer, published_event("Running", 3, 10)).await;
    let ended_draft = ctx.create_event(&organizer, draft_event("Old Draft", 1, 1)).await;
    let cancelled = ctx.create_event(&organizer, published_event("Called Off", 1, 1)).await;
    ctx.register_all(&ended_one, &[&guest]).await;
    ctx.services.event_service.cancel(organizer.id, cancelled.id).await.unwrap();
    let notifications_before = ctx.notifications_for(&guest).await.len();

    ctx.advance(Duration::hours(5));

    assert_eq!(ctx.services.archival.archive_past_events().await.unwrap(), 2);
    assert_eq!(ctx.services.archival.archive_past_events().await.unwrap(), 0);

    assert_eq!(ctx.reload(&ended_one).await.status, EventStatus::Archived);
    assert_eq!(ctx.reload(&ended_two).await.status, EventStatus::Archived);
    assert_eq!(ctx.reload(&running).await.status, EventStatus::Published);
    assert_eq!(ctx.reload(&ended_draft).await.status, EventStatus::Draft);
    assert_eq!(ctx.reload(&cancelled).await.status, EventStatus::Cancelled);

    // Archival is silent
    assert_eq!(ctx.notifications_for(&guest).await.len(), notifications_before);
}

#[tokio::test]
async fn test_event_ending_exactly_now_is_not_archived() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let event = ctx.create_event(&organizer, published_event("Boundary", 1, 1)).await;

    ctx.advance(Duration::hours(2));
    assert_eq!(ctx.services.archival.archive_past_events().await.unwrap(), 0);

    ctx.advance(Duration::seconds(1));
    assert_eq!(ctx.services.archival.archive_past_events().await.unwrap(), 1);
    assert_eq!(ctx.reload(&event).await.status, EventStatus::Archived);
}

#[tokio::test]
async fn test_archive_one_surfaces_validator_reason() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let upcoming = ctx.create_event(&organizer, published_event("Upcoming", 10, 1)).await;

    assert_matches!(
        ctx.services.archival.archive_one(&upcoming).await,
        Err(EventOrganizerError::Lifecycle(LifecycleRejection::ArchiveRequiresEndedPublished))
    );

    ctx.advance(Duration::hours(12));
    let archived = ctx.services.archival.archive_one(&upcoming).await.unwrap();
    assert_eq!(archived.status, EventStatus::Archived);
}

#[tokio::test]
async fn test_sweep_racing_cancel_leaves_one_winner() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let event = ctx.create_event(&organizer, published_event("Race", 1, 1)).await;
    ctx.advance(Duration::hours(3));

    // The organizer loaded the event before the sweep archived it
    let stale = ctx.reload(&event).await;
    ctx.services.archival.archive_past_events().await.unwrap();

    assert_matches!(
        ctx.services.archival.archive_one(&stale).await,
        Ok(ref archived) if archived.status == EventStatus::Archived
    );
    assert_matches!(
        ctx.services.event_service.cancel(organizer.id, event.id).await,
        Err(EventOrganizerError::Lifecycle(LifecycleRejection::TransitionNotAllowed {
            from: EventStatus::Archived,
            to: EventStatus::Cancelled,
        }))
    );
    assert_eq!(ctx.reload(&event).await.status, EventStatus::Archived);
}
