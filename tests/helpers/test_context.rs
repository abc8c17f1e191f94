//! Test context for unified test setup
//!
//! Wires the full service graph to an in-memory store and a fixed clock, so
//! tests exercise the same code paths as production without a database.

use std::sync::Arc;

use chrono::Duration;
use event_organizer::config::Settings;
use event_organizer::database::{EventStore, MemoryStore, NotificationStore, Stores, UserStore};
use event_organizer::models::{CreateEventRequest, CreateUserRequest, Event, Notification, NotificationType, User};
use event_organizer::{Clock, FixedClock, ServiceFactory};

use super::fixtures::base_time;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub services: ServiceFactory,
    pub settings: Settings,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::build(settings, |stores, _| stores)
    }

    /// Swap individual stores for wrappers around the shared MemoryStore
    pub fn with_stores(customize: impl FnOnce(Stores, Arc<MemoryStore>) -> Stores) -> Self {
        Self::build(Settings::default(), customize)
    }

    fn build(settings: Settings, customize: impl FnOnce(Stores, Arc<MemoryStore>) -> Stores) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(base_time()));
        let stores = customize(Stores::from_shared(store.clone()), store.clone());
        let services = ServiceFactory::new(stores, clock.clone() as Arc<dyn Clock>, &settings);

        Self {
            store,
            clock,
            services,
            settings,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    pub async fn create_user(&self, username: &str) -> User {
        self.store
            .create_user(CreateUserRequest::new(username))
            .await
            .expect("Failed to create user")
    }

    pub async fn create_staff(&self, username: &str) -> User {
        let mut request = CreateUserRequest::new(username);
        request.is_staff = true;
        self.store.create_user(request).await.expect("Failed to create staff user")
    }

    pub async fn create_event(&self, organizer: &User, request: CreateEventRequest) -> Event {
        self.services
            .event_service
            .create_event(organizer.id, request)
            .await
            .expect("Failed to create event")
    }

    /// Register each user for the event, panicking on refusal
    pub async fn register_all(&self, event: &Event, users: &[&User]) {
        for user in users {
            self.services
                .admission
                .register(user.id, event.id)
                .await
                .expect("Failed to register user");
        }
    }

    pub async fn reload(&self, event: &Event) -> Event {
        self.store
            .find_event(event.id)
            .await
            .expect("Failed to load event")
            .expect("Event disappeared")
    }

    pub async fn notifications_for(&self, user: &User) -> Vec<Notification> {
        self.store
            .notifications_for(user.id, false)
            .await
            .expect("Failed to load notifications")
    }

    pub async fn notifications_of_type(&self, user: &User, notification_type: NotificationType) -> Vec<Notification> {
        self.notifications_for(user)
            .await
            .into_iter()
            .filter(|n| n.notification_type == notification_type)
            .collect()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
