use chrono::{NaiveDate, NaiveDateTime};

use super::types::CalendarEvent;

/// Events falling on `date`, compared by calendar day only.
pub fn events_for_date(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.day() == Some(date)).collect()
}

/// Events starting at or after `now`, soonest first, at most `limit`.
/// Events without a parseable date are never upcoming.
pub fn upcoming(events: &[CalendarEvent], now: NaiveDateTime, limit: usize) -> Vec<&CalendarEvent> {
    let mut found: Vec<(NaiveDateTime, &CalendarEvent)> = events
        .iter()
        .filter_map(|e| e.starts_at().map(|at| (at, e)))
        .filter(|(at, _)| *at >= now)
        .collect();
    found.sort_by_key(|(at, _)| *at);
    found.into_iter().take(limit).map(|(_, e)| e).collect()
}
