use askama::Template;

use crate::models::event::CalendarEvent;
use crate::models::settings::{SettingDisplay, SettingsTab};
use super::PageContext;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub upcoming: Vec<CalendarEvent>,
    pub total_events: usize,
    pub load_error: Option<String>,
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub tabs: Vec<SettingsTab>,
    pub active: SettingsTab,
    pub settings: Vec<SettingDisplay>,
}
