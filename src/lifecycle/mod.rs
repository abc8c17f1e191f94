//! Event lifecycle
//!
//! The capability table for each event status and the validator that decides
//! whether a requested status change is allowed. Everything here is pure: the
//! caller supplies the event and the current time.

pub mod state;
pub mod transition;

pub use state::{EventAction, EventState};
pub use transition::{available_actions, can_archive, can_edit, can_transition, validate_transition};
