use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::{SETTINGS_ROLES, require_any_role};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::settings::{SettingsTab, settings_for};
use crate::templates_structs::{PageContext, SettingsTemplate};

#[derive(Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

/// GET /settings?tab=
pub async fn list(
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<TabQuery>,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, SETTINGS_ROLES)?;
    let active = SettingsTab::parse(query.tab.as_deref());
    let ctx = PageContext::build(&session, &config, user, "/settings");

    let tmpl = SettingsTemplate {
        ctx,
        tabs: SettingsTab::ALL.to_vec(),
        active,
        settings: settings_for(active, &config.app_name, &config.login_url),
    };
    render(tmpl)
}
