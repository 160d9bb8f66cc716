//! Event create/update/delete from the calendar page.
//!
//! Each handler validates, performs one write through `EventStore`, flashes
//! the outcome and redirects back to the calendar (post/redirect/get).

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Local;

use crate::auth::csrf;
use crate::auth::session::{CALENDAR_ROLES, require_any_role, set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, see_other};
use crate::models::calendar::first_of_month;
use crate::models::event::EventStore;
use crate::store::{StoreError, TableStore};

use super::forms::{CsrfOnly, EventForm};
use super::view::{CalendarView, calendar_url, parse_day, render_calendar};

fn failure_message(action: &str, e: &StoreError) -> String {
    match e {
        StoreError::NotFound { .. } => "Event not found".to_string(),
        _ => format!("Could not {action} the event. Please try again."),
    }
}

/// Calendar view echoing the submitted values and their errors.
fn error_view(form: &EventForm, action: String, is_edit: bool, errors: Vec<String>) -> CalendarView {
    let selected = parse_day(&form.date);
    CalendarView {
        month: first_of_month(selected.unwrap_or_else(|| Local::now().date_naive())),
        selected,
        open_event: None,
        edit_event: None,
        form: Some(form.to_values(action, is_edit)),
        form_errors: errors,
    }
}

/// POST /calendar/events
pub async fn create<S: TableStore + 'static>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, CALENDAR_ROLES)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = form.validate();
    if !errors.is_empty() {
        let view = error_view(&form, "/calendar/events".to_string(), false, errors);
        return render_calendar(store.get_ref(), &config, &session, user, view).await;
    }

    let input = form.to_input();
    let mut events = EventStore::new(store.get_ref());
    match events.create(&input, user.identity()).await {
        Ok(event) => {
            log::info!("{} created event {} '{}'", user.identity(), event.id, event.title);
            set_flash(&session, "Event created");
            let location = match event.day() {
                Some(day) => calendar_url(day, Some(&event.id)),
                None => "/calendar".to_string(),
            };
            Ok(see_other(&location))
        }
        Err(e) => {
            set_flash(&session, &failure_message("create", &e));
            let location = parse_day(&input.date)
                .map(|d| calendar_url(d, None))
                .unwrap_or_else(|| "/calendar".to_string());
            Ok(see_other(&location))
        }
    }
}

/// POST /calendar/events/{id}
pub async fn update<S: TableStore + 'static>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, CALENDAR_ROLES)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        let view = error_view(&form, format!("/calendar/events/{}", urlencoding::encode(&id)), true, errors);
        return render_calendar(store.get_ref(), &config, &session, user, view).await;
    }

    let patch = form.to_patch();
    let mut events = EventStore::new(store.get_ref());
    match events.update(&id, &patch).await {
        Ok(event) => {
            log::info!("{} updated event {id}", user.identity());
            set_flash(&session, "Event updated");
            let location = match event.day() {
                Some(day) => calendar_url(day, Some(&event.id)),
                None => "/calendar".to_string(),
            };
            Ok(see_other(&location))
        }
        Err(e) => {
            set_flash(&session, &failure_message("update", &e));
            Ok(see_other("/calendar"))
        }
    }
}

/// POST /calendar/events/{id}/delete
pub async fn delete<S: TableStore + 'static>(
    store: web::Data<S>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, CALENDAR_ROLES)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let mut events = EventStore::new(store.get_ref());
    match events.delete(&id).await {
        Ok(()) => {
            log::info!("{} deleted event {id}", user.identity());
            set_flash(&session, "Event deleted");
        }
        Err(e) => set_flash(&session, &failure_message("delete", &e)),
    }
    Ok(see_other("/calendar"))
}
