use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Local;

use crate::auth::session::{CALENDAR_ROLES, require_any_role};
use crate::errors::AppError;
use crate::models::event::{CalendarEvent, EventStore, events_for_date, upcoming};
use crate::store::TableStore;

use super::forms::{DayQuery, UpcomingQuery};
use super::view::parse_day;

const DEFAULT_UPCOMING: usize = 5;
const MAX_UPCOMING: usize = 50;

fn load_failed() -> HttpResponse {
    HttpResponse::BadGateway().json(serde_json::json!({
        "error": "Events could not be loaded"
    }))
}

async fn load_events<S: TableStore>(store: &S) -> Option<Vec<CalendarEvent>> {
    let mut events = EventStore::new(store);
    events.fetch_all().await.ok()?;
    Some(events.into_events())
}

/// GET /api/events: every event in canonical shape, ordered by date.
pub async fn list<S: TableStore + 'static>(
    store: web::Data<S>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_any_role(&session, CALENDAR_ROLES)?;
    match load_events(store.get_ref()).await {
        Some(events) => Ok(HttpResponse::Ok().json(events)),
        None => Ok(load_failed()),
    }
}

/// GET /api/events/upcoming?limit=N
pub async fn upcoming_events<S: TableStore + 'static>(
    store: web::Data<S>,
    session: Session,
    query: web::Query<UpcomingQuery>,
) -> Result<HttpResponse, AppError> {
    require_any_role(&session, CALENDAR_ROLES)?;
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING).min(MAX_UPCOMING);

    let Some(events) = load_events(store.get_ref()).await else {
        return Ok(load_failed());
    };
    let soon = upcoming(&events, Local::now().naive_local(), limit);
    Ok(HttpResponse::Ok().json(soon))
}

/// GET /api/events/day?date=YYYY-MM-DD
pub async fn day<S: TableStore + 'static>(
    store: web::Data<S>,
    session: Session,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, AppError> {
    require_any_role(&session, CALENDAR_ROLES)?;
    let Some(date) = parse_day(&query.date) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "date must be YYYY-MM-DD"
        })));
    };

    let Some(events) = load_events(store.get_ref()).await else {
        return Ok(load_failed());
    };
    Ok(HttpResponse::Ok().json(events_for_date(&events, date)))
}
