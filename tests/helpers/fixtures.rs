//! Time and event fixtures

use chrono::{DateTime, Duration, TimeZone, Utc};
use event_organizer::models::CreateEventRequest;

/// The pinned "now" every in-memory test starts from
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap()
}

/// `hours` after [`base_time`]
pub fn hours_from_base(hours: i64) -> DateTime<Utc> {
    base_time() + Duration::hours(hours)
}

/// Published event starting `start_in` hours from the base time and lasting `length` hours
pub fn published_event(title: &str, start_in: i64, length: i64) -> CreateEventRequest {
    CreateEventRequest::new(title, hours_from_base(start_in), hours_from_base(start_in + length))
        .with_location("Community Hall")
        .with_description("Test event")
        .published()
}

/// Draft event starting `start_in` hours from the base time and lasting `length` hours
pub fn draft_event(title: &str, start_in: i64, length: i64) -> CreateEventRequest {
    CreateEventRequest::new(title, hours_from_base(start_in), hours_from_base(start_in + length))
        .with_location("Community Hall")
}

/// Two-hour published event on day two, at `hour` o'clock
pub fn day_two_event(title: &str, hour: u32, end_hour: u32) -> CreateEventRequest {
    let day = Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap();
    CreateEventRequest::new(
        title,
        day + Duration::hours(i64::from(hour)),
        day + Duration::hours(i64::from(end_hour)),
    )
    .published()
}
