//! Database module
//!
//! This module handles database connections, the store traits the services
//! depend on, and their Postgres and in-memory implementations

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, run_migrations, health_check};
pub use memory::MemoryStore;
pub use repositories::{UserRepository, EventRepository, RegistrationRepository, NotificationRepository, ReviewRepository};
pub use service::DatabaseService;
pub use store::{Stores, UserStore, EventStore, RegistrationStore, NotificationStore, ReviewStore};
