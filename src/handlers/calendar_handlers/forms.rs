//! Form structures for the calendar pages.

use serde::Deserialize;

use crate::auth::validate::{validate_date, validate_required};
use crate::models::event::{EventInput, EventPatch, EventStatus};
use crate::templates_structs::EventFormValues;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
    pub date: Option<String>,
    pub event: Option<String>,
    pub edit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct EventForm {
    pub csrf_token: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub attendees: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_type: String,
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

impl EventForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];
        errors.extend(validate_required(&self.title, "Title", 200));
        errors.extend(validate_date(&self.date, "Date"));
        let time = self.time.trim();
        if !time.is_empty() && chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            errors.push("Time must be HH:MM".to_string());
        }
        let status = self.status.trim();
        if !status.is_empty() && !EventStatus::ALL.iter().any(|s| s.as_str() == status) {
            errors.push(format!("Unknown status '{status}'"));
        }
        let attendees = self.attendees.trim();
        if !attendees.is_empty() && attendees.parse::<u32>().is_err() {
            errors.push("Attendees must be a whole number".to_string());
        }
        errors
    }

    /// Call after `validate`.
    pub fn to_input(&self) -> EventInput {
        let status = non_empty(&self.status).unwrap_or_else(|| EventStatus::Draft.as_str().to_string());
        EventInput {
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            venue: self.venue.trim().to_string(),
            status,
            attendees: self.attendees.trim().parse::<i64>().ok(),
            description: non_empty(&self.description),
            event_type: non_empty(&self.event_type),
        }
    }

    /// Full replacement for an edit. Blank optional fields clear the stored
    /// value instead of being left out. Call after `validate`.
    pub fn to_patch(&self) -> EventPatch {
        let input = self.to_input();
        EventPatch {
            description: Some(input.description.clone()),
            event_type: Some(input.event_type.clone()),
            ..EventPatch::from(input)
        }
    }

    /// Echo the submitted values back into the form after a validation failure.
    pub fn to_values(&self, action: String, is_edit: bool) -> EventFormValues {
        EventFormValues {
            action,
            is_edit,
            title: self.title.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            venue: self.venue.clone(),
            status: self.status.clone(),
            attendees: self.attendees.clone(),
            description: self.description.clone(),
            event_type: self.event_type.clone(),
        }
    }
}
