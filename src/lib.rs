//! Event Organizer core
//!
//! Event lifecycle, RSVP admission control and the notifications that follow
//! from both. Callers (HTTP handlers, admin tools, the archival binary) go
//! through the services; persistence sits behind the store traits in
//! [`database::store`].

pub mod config;
pub mod database;
pub mod lifecycle;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventOrganizerError, LifecycleRejection, RegistrationRejection, ReviewRejection, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, MemoryStore, Stores};
pub use services::ServiceFactory;
pub use utils::clock::{Clock, FixedClock, SystemClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
