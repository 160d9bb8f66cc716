use askama::Template;

use crate::models::calendar::MonthGrid;
use crate::models::event::{CalendarEvent, EventStatus};
use super::PageContext;

/// Values shown in the create/edit event form.
#[derive(Debug, Clone, Default)]
pub struct EventFormValues {
    pub action: String,
    pub is_edit: bool,
    pub title: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub status: String,
    pub attendees: String,
    pub description: String,
    pub event_type: String,
}

impl EventFormValues {
    pub fn for_new(date: &str) -> Self {
        Self {
            action: "/calendar/events".to_string(),
            date: date.to_string(),
            status: EventStatus::Draft.as_str().to_string(),
            ..Default::default()
        }
    }

    pub fn for_event(event: &CalendarEvent) -> Self {
        Self {
            action: format!("/calendar/events/{}", urlencoding::encode(&event.id)),
            is_edit: true,
            title: event.title.clone(),
            date: event.day().map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            time: event.time.clone(),
            venue: event.venue.clone(),
            status: event.status.clone(),
            attendees: event.attendees.to_string(),
            description: event.description_or_empty().to_string(),
            event_type: event.event_type_or_empty().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarTemplate {
    pub ctx: PageContext,
    pub grid: MonthGrid,
    pub selected_iso: String,
    pub selected_label: String,
    pub day_events: Vec<CalendarEvent>,
    pub open_event: Option<CalendarEvent>,
    pub form: EventFormValues,
    pub form_errors: Vec<String>,
    pub statuses: Vec<EventStatus>,
    pub load_error: Option<String>,
}
