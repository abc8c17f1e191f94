//! Schedule conflict lookup for a user's confirmed registrations

use std::sync::Arc;

use tracing::debug;

use crate::database::store::RegistrationStore;
use crate::models::{Event, EventStatus};
use crate::utils::errors::Result;

/// Finds a user's "going" events whose time range intersects a candidate event
#[derive(Clone)]
pub struct ScheduleConflictIndex {
    registrations: Arc<dyn RegistrationStore>,
}

impl ScheduleConflictIndex {
    pub fn new(registrations: Arc<dyn RegistrationStore>) -> Self {
        Self { registrations }
    }

    /// Conflicting events ordered by start time, the candidate itself excluded
    pub async fn conflicting_registrations(&self, user_id: i64, candidate: &Event) -> Result<Vec<Event>> {
        let existing = self.registrations.going_events_for_user(user_id).await?;
        let conflicts = find_conflicts(existing, candidate);

        debug!(
            user_id = user_id,
            event_id = candidate.id,
            conflicts = conflicts.len(),
            "Checked schedule conflicts"
        );
        Ok(conflicts)
    }
}

/// Keeps the published events that strictly overlap `candidate`
///
/// Registrations for cancelled or archived events no longer hold a time slot.
pub fn find_conflicts(existing: Vec<Event>, candidate: &Event) -> Vec<Event> {
    existing
        .into_iter()
        .filter(|event| event.status == EventStatus::Published)
        .filter(|event| event.id != candidate.id && event.overlaps(candidate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(hour: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 10, 0, 0, 0).unwrap() + Duration::hours(hour)
    }

    fn event(id: i64, title: &str, start: i64, end: i64) -> Event {
        Event {
            id,
            title: title.to_string(),
            description: String::new(),
            location: String::new(),
            latitude: None,
            longitude: None,
            starts_at: at(start),
            ends_at: at(end),
            status: EventStatus::Published,
            capacity: None,
            category: String::new(),
            organizer_id: 1,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    #[test]
    fn test_touching_boundary_is_not_a_conflict() {
        let a = event(1, "A", 10, 12);
        let b = event(2, "B", 12, 14);
        assert!(find_conflicts(vec![a], &b).is_empty());
    }

    #[test]
    fn test_partial_overlap_is_a_conflict() {
        let a = event(1, "A", 10, 12);
        let c = event(3, "C", 11, 13);
        let conflicts = find_conflicts(vec![a], &c);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].title, "A");
    }

    #[test]
    fn test_candidate_itself_is_excluded() {
        let a = event(1, "A", 10, 12);
        assert!(find_conflicts(vec![a.clone()], &a).is_empty());
    }

    #[test]
    fn test_cancelled_event_frees_its_slot() {
        let mut a = event(1, "A", 10, 12);
        a.status = EventStatus::Cancelled;
        let c = event(3, "C", 11, 13);
        assert!(find_conflicts(vec![a], &c).is_empty());
    }

    proptest! {
        #[test]
        fn prop_conflict_is_symmetric(
            a_start in 0i64..48, a_len in 1i64..12,
            b_start in 0i64..48, b_len in 1i64..12,
        ) {
            let a = event(1, "A", a_start, a_start + a_len);
            let b = event(2, "B", b_start, b_start + b_len);
            let ab = !find_conflicts(vec![a.clone()], &b).is_empty();
            let ba = !find_conflicts(vec![b], &a).is_empty();
            prop_assert_eq!(ab, ba);
        }
    }
}
