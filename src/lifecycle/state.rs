//! Per-status capability table

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EventStatus;

/// Organizer-facing action on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Edit,
    Publish,
    Cancel,
    Archive,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Edit => "edit",
            EventAction::Publish => "publish",
            EventAction::Cancel => "cancel",
            EventAction::Archive => "archive",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an event may do while it is in a given status
///
/// `can_archive` ignores timing; the archive rule also needs the event to have
/// ended, which [`super::transition::validate_transition`] checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventState {
    pub status: EventStatus,
    pub can_edit: bool,
    pub can_publish: bool,
    pub can_cancel: bool,
    pub can_archive: bool,
}

const DRAFT: EventState = EventState {
    status: EventStatus::Draft,
    can_edit: true,
    can_publish: true,
    can_cancel: true,
    can_archive: false,
};

const PUBLISHED: EventState = EventState {
    status: EventStatus::Published,
    can_edit: true,
    can_publish: false,
    can_cancel: true,
    can_archive: true,
};

const CANCELLED: EventState = EventState {
    status: EventStatus::Cancelled,
    can_edit: false,
    can_publish: false,
    can_cancel: false,
    can_archive: false,
};

const ARCHIVED: EventState = EventState {
    status: EventStatus::Archived,
    can_edit: false,
    can_publish: false,
    can_cancel: false,
    can_archive: false,
};

impl EventState {
    pub fn of(status: EventStatus) -> &'static EventState {
        match status {
            EventStatus::Draft => &DRAFT,
            EventStatus::Published => &PUBLISHED,
            EventStatus::Cancelled => &CANCELLED,
            EventStatus::Archived => &ARCHIVED,
        }
    }

    /// Statuses reachable from this one, not counting the same-status no-op
    pub fn allowed_transitions(&self) -> Vec<EventStatus> {
        let mut targets = Vec::new();
        if self.can_publish {
            targets.push(EventStatus::Published);
        }
        if self.can_cancel {
            targets.push(EventStatus::Cancelled);
        }
        if self.can_archive {
            targets.push(EventStatus::Archived);
        }
        targets
    }

    pub fn allows(&self, target: EventStatus) -> bool {
        match target {
            EventStatus::Draft => false,
            EventStatus::Published => self.can_publish,
            EventStatus::Cancelled => self.can_cancel,
            EventStatus::Archived => self.can_archive,
        }
    }

    /// Actions in display order, before any timing rule is applied
    pub fn actions(&self) -> Vec<EventAction> {
        let mut actions = Vec::new();
        if self.can_edit {
            actions.push(EventAction::Edit);
        }
        if self.can_publish {
            actions.push(EventAction::Publish);
        }
        if self.can_cancel {
            actions.push(EventAction::Cancel);
        }
        if self.can_archive {
            actions.push(EventAction::Archive);
        }
        actions
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}
