//! Database repositories module
//!
//! Postgres implementations of the store traits

pub mod user;
pub mod event;
pub mod registration;
pub mod notification;
pub mod review;

// Re-export repositories
pub use user::UserRepository;
pub use event::EventRepository;
pub use registration::RegistrationRepository;
pub use notification::NotificationRepository;
pub use review::ReviewRepository;
