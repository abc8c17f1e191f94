//! Database service layer
//!
//! Bundles the Postgres repositories behind one pool

use std::sync::Arc;

use crate::database::{DatabasePool, UserRepository, EventRepository, RegistrationRepository, NotificationRepository, ReviewRepository};
use crate::database::store::Stores;
use crate::utils::errors::EventOrganizerError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub notifications: NotificationRepository,
    pub reviews: ReviewRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool.clone()),
            pool,
        }
    }

    /// Store trait objects backed by these repositories
    pub fn stores(&self) -> Stores {
        Stores {
            users: Arc::new(self.users.clone()),
            events: Arc::new(self.events.clone()),
            registrations: Arc::new(self.registrations.clone()),
            notifications: Arc::new(self.notifications.clone()),
            reviews: Arc::new(self.reviews.clone()),
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), EventOrganizerError> {
        crate::database::connection::health_check(&self.pool).await
    }
}
