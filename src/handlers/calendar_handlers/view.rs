use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, NaiveDate};

use crate::auth::session::{CALENDAR_ROLES, CurrentUser, require_any_role};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::calendar::{
    DayClick, build_month_grid, day_click, first_of_month, month_param, parse_month,
};
use crate::models::event::{EventStatus, EventStore, events_for_date};
use crate::store::TableStore;
use crate::templates_structs::{CalendarTemplate, EventFormValues, PageContext};

use super::forms::{CalendarQuery, DayQuery};

pub(super) fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// URL of the calendar showing `date`'s month with `date` selected.
pub(super) fn calendar_url(date: NaiveDate, open_event: Option<&str>) -> String {
    let mut url = format!(
        "/calendar?month={}&date={}",
        month_param(date),
        date.format("%Y-%m-%d")
    );
    if let Some(id) = open_event {
        url.push_str("&event=");
        url.push_str(&urlencoding::encode(id));
    }
    url
}

/// Everything the calendar page needs besides the event list.
pub(super) struct CalendarView {
    pub month: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub open_event: Option<String>,
    pub edit_event: Option<String>,
    pub form: Option<EventFormValues>,
    pub form_errors: Vec<String>,
}

impl CalendarView {
    fn from_query(query: &CalendarQuery, today: NaiveDate) -> Self {
        let selected = query.date.as_deref().and_then(parse_day);
        let month = query
            .month
            .as_deref()
            .and_then(parse_month)
            .or(selected.map(first_of_month))
            .unwrap_or_else(|| first_of_month(today));
        Self {
            month,
            selected,
            open_event: query.event.clone().filter(|s| !s.is_empty()),
            edit_event: query.edit.clone().filter(|s| !s.is_empty()),
            form: None,
            form_errors: vec![],
        }
    }
}

/// Load events and render the calendar page.
pub(super) async fn render_calendar<S: TableStore>(
    store: &S,
    config: &AppConfig,
    session: &Session,
    user: CurrentUser,
    view: CalendarView,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, config, user, "/calendar");
    let today = Local::now().date_naive();

    let mut events = EventStore::new(store);
    let load_error = events
        .fetch_all()
        .await
        .err()
        .map(|_| "Events could not be loaded. Try again later.".to_string());

    let grid = build_month_grid(view.month, events.events(), view.selected, today);
    let day_events = view
        .selected
        .map(|d| events_for_date(events.events(), d).into_iter().cloned().collect())
        .unwrap_or_default();
    let open_event = view.open_event.as_deref().and_then(|id| events.find(id)).cloned();

    let default_date = view.selected.unwrap_or(today).format("%Y-%m-%d").to_string();
    let form = match view.form {
        Some(values) => values,
        None => view
            .edit_event
            .as_deref()
            .and_then(|id| events.find(id))
            .map(EventFormValues::for_event)
            .unwrap_or_else(|| EventFormValues::for_new(&default_date)),
    };

    let tmpl = CalendarTemplate {
        ctx,
        grid,
        selected_iso: view.selected.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        selected_label: view.selected.map(|d| d.format("%A, %B %-d, %Y").to_string()).unwrap_or_default(),
        day_events,
        open_event,
        form,
        form_errors: view.form_errors,
        statuses: EventStatus::ALL.to_vec(),
        load_error,
    };
    render(tmpl)
}

/// GET /calendar: month grid, selected day and event detail.
pub async fn index<S: TableStore + 'static>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, CALENDAR_ROLES)?;
    let view = CalendarView::from_query(&query, Local::now().date_naive());
    render_calendar(store.get_ref(), &config, &session, user, view).await
}

/// GET /calendar/day: a click on a day cell. Opens the event detail only
/// when the day holds exactly one event.
pub async fn select_day<S: TableStore + 'static>(
    store: web::Data<S>,
    session: Session,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, AppError> {
    require_any_role(&session, CALENDAR_ROLES)?;

    let Some(date) = parse_day(&query.date) else {
        log::warn!("Ignoring day click with bad date '{}'", query.date);
        return Ok(see_other("/calendar"));
    };

    let mut events = EventStore::new(store.get_ref());
    if events.fetch_all().await.is_err() {
        return Ok(see_other(&calendar_url(date, None)));
    }

    let location = match day_click(events.events(), date) {
        DayClick::OpenEvent { date, event_id } => calendar_url(date, Some(&event_id)),
        DayClick::Select(date) => calendar_url(date, None),
    };
    Ok(see_other(&location))
}
