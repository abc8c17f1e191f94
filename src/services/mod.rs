//! Services module
//!
//! This module contains business logic services

pub mod admission;
pub mod archive;
pub mod conflicts;
pub mod event;
pub mod inbox;
pub mod notification;
pub mod review;

// Re-export commonly used services
pub use admission::{AdmissionContext, AdmissionController, check_eligibility};
pub use archive::{ArchivalSweep, TransitionOutcome};
pub use conflicts::ScheduleConflictIndex;
pub use event::{EventService, EventUpdate};
pub use inbox::NotificationInbox;
pub use notification::{ChangeNotice, NotificationDispatcher, describe_changes};
pub use review::ReviewService;

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::database::store::Stores;
use crate::utils::clock::Clock;

/// Service factory wiring every service to one set of stores and one clock
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub admission: AdmissionController,
    pub notifications: NotificationDispatcher,
    pub inbox: NotificationInbox,
    pub archival: ArchivalSweep,
    pub conflicts: ScheduleConflictIndex,
    pub reviews: ReviewService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, settings: &Settings) -> Self {
        let notifications = NotificationDispatcher::new(
            stores.users.clone(),
            stores.registrations.clone(),
            stores.notifications.clone(),
            settings.notifications.time_format.clone(),
        );
        let archival = ArchivalSweep::new(stores.events.clone(), clock.clone());
        let event_service = EventService::new(
            stores.users.clone(),
            stores.events.clone(),
            notifications.clone(),
            archival.clone(),
            clock.clone(),
        );
        let admission = AdmissionController::new(
            stores.users.clone(),
            stores.events.clone(),
            stores.registrations.clone(),
            notifications.clone(),
            clock.clone(),
        );
        let inbox = NotificationInbox::new(stores.notifications.clone());
        let conflicts = ScheduleConflictIndex::new(stores.registrations.clone());
        let reviews = ReviewService::new(stores.events, stores.registrations, stores.reviews, clock);

        Self {
            event_service,
            admission,
            notifications,
            inbox,
            archival,
            conflicts,
            reviews,
        }
    }
}
