use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, Timelike};

use crate::auth::session::{CALENDAR_ROLES, require_any_role};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::event::{EventStore, upcoming};
use crate::store::TableStore;
use crate::templates_structs::{DashboardTemplate, PageContext};

const UPCOMING_LIMIT: usize = 5;

fn time_greeting(name: &str, hour: u32) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {name}")
}

pub async fn index<S: TableStore + 'static>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, CALENDAR_ROLES)?;
    let ctx = PageContext::build(&session, &config, user, "/dashboard");

    let mut events = EventStore::new(store.get_ref());
    let load_error = events
        .fetch_all()
        .await
        .err()
        .map(|_| "Events could not be loaded. Try again later.".to_string());

    let now = Local::now();
    let soon = upcoming(events.events(), now.naive_local(), UPCOMING_LIMIT)
        .into_iter()
        .cloned()
        .collect();

    let tmpl = DashboardTemplate {
        greeting: time_greeting(ctx.user.name(), now.hour()),
        ctx,
        upcoming: soon,
        total_events: events.events().len(),
        load_error,
    };
    render(tmpl)
}
