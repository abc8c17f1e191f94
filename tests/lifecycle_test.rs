//! Event lifecycle through the service layer

mod helpers;

use assert_matches::assert_matches;
use chrono::Duration;
use event_organizer::lifecycle::{validate_transition, EventAction};
use event_organizer::models::{EventChanges, EventStatus};
use event_organizer::{Clock, EventOrganizerError, LifecycleRejection};
use helpers::*;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_draft_publish_and_archive_scenario() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("olena").await;
    let event = ctx.create_event(&organizer, draft_event("Spring Meetup", 24, 2)).await;
    assert_eq!(event.status, EventStatus::Draft);

    let now = ctx.clock.now();
    assert_ok!(validate_transition(&event, EventStatus::Published, now));
    assert_err!(validate_transition(&event, EventStatus::Archived, now));

    let published = assert_ok!(ctx.services.event_service.publish(organizer.id, event.id).await);
    assert_eq!(published.status, EventStatus::Published);

    // Still upcoming: the archive-specific reason applies
    let err = ctx.services.event_service.archive(organizer.id, event.id).await.unwrap_err();
    assert_matches!(err, EventOrganizerError::Lifecycle(LifecycleRejection::ArchiveRequiresEndedPublished));
    assert!(err.reason().unwrap().contains("ended, published"));

    ctx.advance(Duration::hours(27));
    let archived = assert_ok!(ctx.services.event_service.archive(organizer.id, event.id).await);
    assert_eq!(archived.status, EventStatus::Archived);
}

#[tokio::test]
async fn test_impossible_transitions_report_generic_reason() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let draft = ctx.create_event(&organizer, draft_event("Draft", 1, 1)).await;
    ctx.advance(Duration::days(1));

    // An ended draft is still "not possible", not the archive-specific reason
    let err = ctx.services.event_service.archive(organizer.id, draft.id).await.unwrap_err();
    assert_matches!(
        err,
        EventOrganizerError::Lifecycle(LifecycleRejection::TransitionNotAllowed {
            from: EventStatus::Draft,
            to: EventStatus::Archived,
        })
    );

    ctx.services.event_service.cancel(organizer.id, draft.id).await.unwrap();
    let err = ctx.services.event_service.publish(organizer.id, draft.id).await.unwrap_err();
    assert_eq!(err.reason().as_deref(), Some("Transition from 'cancelled' to 'published' is not possible"));
}

#[tokio::test]
async fn test_same_status_is_a_no_op() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let event = ctx.create_event(&organizer, published_event("Talk", 5, 1)).await;

    let again = ctx.services.event_service.publish(organizer.id, event.id).await.unwrap();
    assert_eq!(again.status, EventStatus::Published);
    assert_eq!(again.updated_at, event.updated_at);
}

#[tokio::test]
async fn test_only_organizer_or_staff_may_transition() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let stranger = ctx.create_user("stranger").await;
    let moderator = ctx.create_staff("moderator").await;
    let event = ctx.create_event(&organizer, draft_event("Private", 5, 1)).await;

    assert_matches!(
        ctx.services.event_service.publish(stranger.id, event.id).await,
        Err(EventOrganizerError::PermissionDenied(_))
    );
    assert_eq!(ctx.reload(&event).await.status, EventStatus::Draft);

    let published = ctx.services.event_service.publish(moderator.id, event.id).await.unwrap();
    assert_eq!(published.status, EventStatus::Published);
}

#[tokio::test]
async fn test_unknown_ids_are_hard_errors() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;

    let err = ctx.services.event_service.cancel(organizer.id, 9999).await.unwrap_err();
    assert_matches!(err, EventOrganizerError::EventNotFound { event_id: 9999 });
    assert!(!err.is_rejection());

    assert_matches!(
        ctx.services.event_service.create_event(4242, published_event("Orphan", 5, 1)).await,
        Err(EventOrganizerError::UserNotFound { user_id: 4242 })
    );
}

#[tokio::test]
async fn test_create_event_validation() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;

    let mut backwards = published_event("Backwards", 5, 1);
    backwards.ends_at = backwards.starts_at - Duration::minutes(1);
    assert_matches!(
        ctx.services.event_service.create_event(organizer.id, backwards).await,
        Err(EventOrganizerError::InvalidInput(_))
    );

    let zero_capacity = published_event("Tiny", 5, 1).with_capacity(0);
    assert_matches!(
        ctx.services.event_service.create_event(organizer.id, zero_capacity).await,
        Err(EventOrganizerError::InvalidInput(_))
    );

    let mut born_cancelled = published_event("Cancelled", 5, 1);
    born_cancelled.status = EventStatus::Cancelled;
    assert_matches!(
        ctx.services.event_service.create_event(organizer.id, born_cancelled).await,
        Err(EventOrganizerError::InvalidInput(_))
    );

    let located = published_event("Located", 5, 1).with_coordinates(50.4501, 30.5234).with_capacity(20);
    let event = ctx.services.event_service.create_event(organizer.id, located).await.unwrap();
    assert_eq!(event.latitude, Some(50.4501));
    assert_eq!(event.capacity, Some(20));
}

#[tokio::test]
async fn test_cancelled_event_cannot_be_edited() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let event = ctx.create_event(&organizer, published_event("Concert", 5, 2)).await;
    ctx.services.event_service.cancel(organizer.id, event.id).await.unwrap();

    let changes = EventChanges {
        title: Some("Concert (rescheduled)".to_string()),
        ..Default::default()
    };
    assert_matches!(
        ctx.services.event_service.update_event(organizer.id, event.id, changes).await,
        Err(EventOrganizerError::Lifecycle(LifecycleRejection::NotEditable { status: EventStatus::Cancelled }))
    );
}

#[tokio::test]
async fn test_update_rejects_invalid_result() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let event = ctx.create_event(&organizer, published_event("Lecture", 5, 2)).await;

    let changes = EventChanges {
        ends_at: Some(event.starts_at),
        ..Default::default()
    };
    assert_matches!(
        ctx.services.event_service.update_event(organizer.id, event.id, changes).await,
        Err(EventOrganizerError::InvalidInput(_))
    );
    assert_eq!(ctx.reload(&event).await.ends_at, event.ends_at);
}

#[tokio::test]
async fn test_available_actions_follow_time() {
    let ctx = TestContext::new();
    let organizer = ctx.create_user("organizer").await;
    let draft = ctx.create_event(&organizer, draft_event("Draft", 5, 1)).await;
    let live = ctx.create_event(&organizer, published_event("Live", 5, 1)).await;

    assert_eq!(
        ctx.services.event_service.available_actions(draft.id).await.unwrap(),
        vec![EventAction::Edit, EventAction::Publish, EventAction::Cancel]
    );
    assert_eq!(
        ctx.services.event_service.available_actions(live.id).await.unwrap(),
        vec![EventAction::Edit, EventAction::Cancel]
    );

    ctx.advance(Duration::hours(7));
    assert_eq!(
        ctx.services.event_service.available_actions(live.id).await.unwrap(),
        vec![EventAction::Edit, EventAction::Cancel, EventAction::Archive]
    );
}
