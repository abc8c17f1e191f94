//! Error handling for the event organizer core
//!
//! This module defines the main error type used throughout the crate. Expected
//! business-rule outcomes (a refused transition, a full event, a time conflict)
//! are carried as typed rejections so callers can show the reason to the end
//! user, while missing entities and infrastructure failures stay hard errors.

use thiserror::Error;

use crate::models::EventStatus;

/// Main error type for the event organizer
#[derive(Error, Debug)]
pub enum EventOrganizerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Registration not found: user {user_id} for event {event_id}")]
    RegistrationNotFound { user_id: i64, event_id: i64 },

    #[error("Notification not found: {notification_id}")]
    NotificationNotFound { notification_id: i64 },

    #[error("{0}")]
    Lifecycle(#[from] LifecycleRejection),

    #[error("{0}")]
    Registration(#[from] RegistrationRejection),

    #[error("{0}")]
    Review(#[from] ReviewRejection),

    #[error("Event {event_id} was modified concurrently")]
    ConcurrentModification { event_id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Reasons a lifecycle change (transition or edit) is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleRejection {
    #[error("Transition from '{from}' to '{to}' is not possible")]
    TransitionNotAllowed { from: EventStatus, to: EventStatus },

    #[error("Only ended, published events may be archived")]
    ArchiveRequiresEndedPublished,

    #[error("Events in status '{status}' can no longer be edited")]
    NotEditable { status: EventStatus },
}

/// Reasons a registration (RSVP) is refused, in evaluation order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationRejection {
    #[error("Event is not published yet")]
    NotPublished,

    #[error("Event has been cancelled")]
    Cancelled,

    #[error("Event is archived")]
    Archived,

    #[error("Event has already started")]
    AlreadyStarted,

    #[error("You are already registered for this event")]
    AlreadyRegistered,

    #[error("Event capacity is full")]
    CapacityFull,

    #[error("Time conflict with '{title}'")]
    TimeConflict { title: String },
}

/// Reasons a review is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewRejection {
    #[error("Rating must be between 1 and 5, got {rating}")]
    InvalidRating { rating: i16 },

    #[error("Reviews can only be left after the event has ended")]
    EventNotEnded,

    #[error("Only registered participants can review this event")]
    NotRegistered,

    #[error("You have already reviewed this event")]
    AlreadyReviewed,
}

/// Result type alias for event organizer operations
pub type Result<T> = std::result::Result<T, EventOrganizerError>;

impl EventOrganizerError {
    /// Whether this is an expected business-rule outcome rather than a failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            EventOrganizerError::Lifecycle(_)
                | EventOrganizerError::Registration(_)
                | EventOrganizerError::Review(_)
        )
    }

    /// User-facing reason for rejections, `None` for hard errors
    pub fn reason(&self) -> Option<String> {
        if self.is_rejection() {
            Some(self.to_string())
        } else {
            None
        }
    }

    /// Whether the caller can reasonably retry or correct the request
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventOrganizerError::Database(_) => false,
            EventOrganizerError::Migration(_) => false,
            EventOrganizerError::Config(_) => false,
            EventOrganizerError::ConfigLoad(_) => false,
            EventOrganizerError::PermissionDenied(_) => false,
            EventOrganizerError::UserNotFound { .. } => false,
            EventOrganizerError::EventNotFound { .. } => false,
            EventOrganizerError::RegistrationNotFound { .. } => false,
            EventOrganizerError::NotificationNotFound { .. } => false,
            EventOrganizerError::Lifecycle(_) => true,
            EventOrganizerError::Registration(_) => true,
            EventOrganizerError::Review(_) => true,
            EventOrganizerError::ConcurrentModification { .. } => true,
            EventOrganizerError::Io(_) => true,
            EventOrganizerError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventOrganizerError::Database(_) => ErrorSeverity::Critical,
            EventOrganizerError::Migration(_) => ErrorSeverity::Critical,
            EventOrganizerError::Config(_) => ErrorSeverity::Critical,
            EventOrganizerError::ConfigLoad(_) => ErrorSeverity::Critical,
            EventOrganizerError::PermissionDenied(_) => ErrorSeverity::Warning,
            EventOrganizerError::ConcurrentModification { .. } => ErrorSeverity::Warning,
            EventOrganizerError::Lifecycle(_)
            | EventOrganizerError::Registration(_)
            | EventOrganizerError::Review(_)
            | EventOrganizerError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
