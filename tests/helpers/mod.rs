//! Test helpers module
//!
//! Shared setup for the integration tests: an in-memory service context with
//! a pinned clock, event fixtures, and a Postgres test database.

#![allow(dead_code)]

pub mod database_helper;
pub mod faulty_stores;
pub mod fixtures;
pub mod test_context;

pub use database_helper::*;
pub use faulty_stores::*;
pub use fixtures::*;
pub use test_context::*;
