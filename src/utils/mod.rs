//! Utility modules
//!
//! This module contains common utilities used throughout the crate,
//! including error handling, logging setup, and the time source.

pub mod errors;
pub mod logging;
pub mod clock;

pub use errors::{EventOrganizerError, Result};
pub use clock::{Clock, SystemClock, FixedClock};
