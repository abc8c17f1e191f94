//! Notification generation
//!
//! Renders one message per triggering change and writes it once per recipient.
//! Event-level changes go to every "going" participant except the organizer;
//! registration changes go to the organizer. Delivery is out of scope: the
//! rows written here are what recipients read through the inbox.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::database::store::{NotificationStore, RegistrationStore, UserStore};
use crate::models::{Event, EventSnapshot, NewNotification, NotificationType, Registration};
use crate::utils::errors::{EventOrganizerError, Result};
use crate::utils::logging::log_notification_fanout;

/// A rendered change notification, ready to fan out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub notification_type: NotificationType,
    pub message: String,
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    users: Arc<dyn UserStore>,
    registrations: Arc<dyn RegistrationStore>,
    notifications: Arc<dyn NotificationStore>,
    time_format: String,
}

impl NotificationDispatcher {
    pub fn new(
        users: Arc<dyn UserStore>,
        registrations: Arc<dyn RegistrationStore>,
        notifications: Arc<dyn NotificationStore>,
        time_format: impl Into<String>,
    ) -> Self {
        Self {
            users,
            registrations,
            notifications,
            time_format: time_format.into(),
        }
    }

    /// Notify participants about edits since `previous`; 0 when nothing visible changed
    pub async fn on_event_updated(&self, event: &Event, previous: &EventSnapshot) -> Result<usize> {
        match describe_changes(event, previous, &self.time_format)? {
            Some(notice) => self.notify_participants(event, notice.notification_type, notice.message).await,
            None => {
                debug!(event_id = event.id, "Event saved without visible changes");
                Ok(0)
            }
        }
    }

    pub async fn on_event_cancelled(&self, event: &Event) -> Result<usize> {
        let message = format!("Event '{}' was cancelled by the organizer.", event.title);
        self.notify_participants(event, NotificationType::EventCancelled, message).await
    }

    pub async fn on_registration_created(&self, event: &Event, registration: &Registration) -> Result<usize> {
        let username = self.username(registration.user_id).await?;
        let message = format!("{} registered for '{}'", username, event.title);
        self.notify_organizer(event, NotificationType::RsvpConfirmed, message).await
    }

    pub async fn on_registration_cancelled(&self, event: &Event, registration: &Registration) -> Result<usize> {
        let username = self.username(registration.user_id).await?;
        let message = format!("{} cancelled their registration for '{}'", username, event.title);
        self.notify_organizer(event, NotificationType::RsvpCancelled, message).await
    }

    async fn username(&self, user_id: i64) -> Result<String> {
        self.users
            .find_user(user_id)
            .await?
            .map(|user| user.username)
            .ok_or(EventOrganizerError::UserNotFound { user_id })
    }

    async fn notify_participants(
        &self,
        event: &Event,
        notification_type: NotificationType,
        message: String,
    ) -> Result<usize> {
        let recipients: Vec<i64> = self
            .registrations
            .going_participant_ids(event.id)
            .await?
            .into_iter()
            .filter(|user_id| *user_id != event.organizer_id)
            .collect();

        self.write(event.id, notification_type, &message, &recipients).await
    }

    async fn notify_organizer(
        &self,
        event: &Event,
        notification_type: NotificationType,
        message: String,
    ) -> Result<usize> {
        self.write(event.id, notification_type, &message, &[event.organizer_id]).await
    }

    async fn write(
        &self,
        event_id: i64,
        notification_type: NotificationType,
        message: &str,
        recipients: &[i64],
    ) -> Result<usize> {
        if recipients.is_empty() {
            log_notification_fanout(event_id, notification_type.label(), 0);
            return Ok(0);
        }

        let rows: Vec<NewNotification> = recipients
            .iter()
            .map(|recipient_id| NewNotification {
                recipient_id: *recipient_id,
                event_id,
                notification_type,
                message: message.to_string(),
            })
            .collect();

        let written = self.notifications.insert_notifications(&rows).await? as usize;
        log_notification_fanout(event_id, notification_type.label(), written);
        Ok(written)
    }
}

/// Diff `event` against `previous` and render the change list
///
/// Returns `None` when no user-visible field changed. The type is
/// `EventTimeChanged` or `EventLocationChanged` only when that is the sole
/// change; any combination is a generic `EventUpdated`.
pub fn describe_changes(
    event: &Event,
    previous: &EventSnapshot,
    time_format: &str,
) -> Result<Option<ChangeNotice>> {
    let time_changed = previous.starts_at != event.starts_at || previous.ends_at != event.ends_at;
    let location_changed = previous.location != event.location;
    let title_changed = previous.title != event.title;
    let description_changed = previous.description != event.description;

    let mut changes = Vec::new();
    if time_changed {
        changes.push(format!(
            "Time changed from {} to {}",
            format_time(previous.starts_at, time_format)?,
            format_time(event.starts_at, time_format)?
        ));
    }
    if location_changed {
        changes.push(format!(
            "Location changed from '{}' to '{}'",
            location_or_placeholder(&previous.location),
            location_or_placeholder(&event.location)
        ));
    }
    if title_changed {
        changes.push(format!("Title changed to '{}'", event.title));
    }
    if description_changed {
        changes.push("Description updated".to_string());
    }

    if changes.is_empty() {
        return Ok(None);
    }

    let notification_type = match (time_changed, location_changed, title_changed || description_changed) {
        (true, false, false) => NotificationType::EventTimeChanged,
        (false, true, false) => NotificationType::EventLocationChanged,
        _ => NotificationType::EventUpdated,
    };

    let mut message = format!("Event '{}' was updated:", event.title);
    for change in &changes {
        message.push_str("\n• ");
        message.push_str(change);
    }

    Ok(Some(ChangeNotice { notification_type, message }))
}

fn location_or_placeholder(location: &str) -> &str {
    if location.is_empty() {
        "not specified"
    } else {
        location
    }
}

fn format_time(time: DateTime<Utc>, format: &str) -> Result<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", time.format(format))
        .map_err(|_| EventOrganizerError::Config(format!("Invalid time format: {}", format)))?;
    Ok(rendered)
}
