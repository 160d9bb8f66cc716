use serde_json::Value;

use crate::store::Row;
use super::types::{CalendarEvent, status_color};

// Candidate backend columns per canonical field, in precedence order.
pub const ID_ALIASES: &[&str] = &["id", "event_id"];
pub const TITLE_ALIASES: &[&str] = &["title", "name", "event_name"];
pub const DATE_ALIASES: &[&str] = &["date", "start_date", "event_date"];
pub const TIME_ALIASES: &[&str] = &["time", "start_time", "event_time"];
pub const VENUE_ALIASES: &[&str] = &["venue", "location", "place"];
pub const STATUS_ALIASES: &[&str] = &["status", "event_status"];
pub const ATTENDEES_ALIASES: &[&str] = &["attendees", "attendee_count", "expected_attendees"];
pub const DESCRIPTION_ALIASES: &[&str] = &["description", "details"];
pub const EVENT_TYPE_ALIASES: &[&str] = &["event_type", "type", "category"];

/// First candidate holding a usable value. `null` and `""` count as absent.
pub fn resolve_alias<'a>(row: &'a Row, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| row.get(*key))
        .find(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn text(row: &Row, candidates: &[&str]) -> Option<String> {
    match resolve_alias(row, candidates)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn integer(row: &Row, candidates: &[&str]) -> Option<i64> {
    match resolve_alias(row, candidates)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Map one backend row onto the canonical event shape. Never fails: missing
/// fields fall back to `""` / `0` / `None`.
pub fn normalize_event(row: &Row) -> CalendarEvent {
    let status = text(row, STATUS_ALIASES).unwrap_or_default();
    CalendarEvent {
        id: text(row, ID_ALIASES).unwrap_or_default(),
        title: text(row, TITLE_ALIASES).unwrap_or_default(),
        date: text(row, DATE_ALIASES).unwrap_or_default(),
        time: text(row, TIME_ALIASES).unwrap_or_default(),
        venue: text(row, VENUE_ALIASES).unwrap_or_default(),
        color: status_color(&status),
        status,
        attendees: integer(row, ATTENDEES_ALIASES).unwrap_or(0),
        description: text(row, DESCRIPTION_ALIASES),
        event_type: text(row, EVENT_TYPE_ALIASES),
    }
}
