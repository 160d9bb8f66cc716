use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Canonical in-memory event, produced by `normalize_event`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub status: String,
    pub attendees: i64,
    /// Presentation class derived from `status`; never written back.
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

impl CalendarEvent {
    /// Calendar day of the event; the time-of-day part of `date`, if any, is ignored.
    pub fn day(&self) -> Option<NaiveDate> {
        let head = self.date.get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    /// Start instant: `day()` plus `time` (`HH:MM` or `HH:MM:SS`), midnight when unset.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let day = self.day()?;
        let time = parse_time(&self.time).unwrap_or(NaiveTime::MIN);
        Some(day.and_time(time))
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn event_type_or_empty(&self) -> &str {
        self.event_type.as_deref().unwrap_or("")
    }
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Lifecycle states offered by the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Draft,
    Published,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 5] = [
        EventStatus::Draft,
        EventStatus::Published,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Draft => "Draft",
            EventStatus::Published => "Published",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

/// Color class for a status. Unknown and draft statuses share the fallback.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "published" => "bg-green-500",
        "ongoing" => "bg-blue-500",
        "completed" => "bg-gray-500",
        "cancelled" => "bg-red-500",
        _ => "bg-yellow-500",
    }
}

/// Writable fields of an event, as submitted by the calendar form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub attendees: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
}

/// Partial update: only `Some` fields are sent. For the optional text
/// columns `Some(None)` is sent as `null` and clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<Option<String>>,
}

impl From<EventInput> for EventPatch {
    fn from(input: EventInput) -> Self {
        EventPatch {
            title: Some(input.title),
            date: Some(input.date),
            time: Some(input.time),
            venue: Some(input.venue),
            status: Some(input.status),
            attendees: Some(input.attendees.unwrap_or(0)),
            description: input.description.map(Some),
            event_type: input.event_type.map(Some),
        }
    }
}
