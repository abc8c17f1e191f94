//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod registration;
pub mod review;
pub mod notification;

// Re-export commonly used models
pub use user::{User, CreateUserRequest};
pub use event::{Event, EventStatus, EventSnapshot, EventChanges, CreateEventRequest};
pub use registration::{Registration, RsvpStatus, NewRegistration};
pub use review::{Review, NewReview, NewReviewRequest, RatingSummary};
pub use notification::{Notification, NotificationType, NewNotification};
