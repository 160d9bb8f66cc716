// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{
    CALENDAR_ROLES, CurrentUser, ONBOARDING_ROLES, Role, SETTINGS_ROLES, take_flash,
};
use crate::config::AppConfig;

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: &[(&str, &str, &[Role])] = &[
    ("/dashboard", "Dashboard", CALENDAR_ROLES),
    ("/calendar", "Calendar", CALENDAR_ROLES),
    ("/onboarding/exhibitor", "Add exhibitor", ONBOARDING_ROLES),
    ("/onboarding/society", "Add society", ONBOARDING_ROLES),
    ("/settings", "Settings", SETTINGS_ROLES),
];

/// Sidebar links the user's roles allow.
pub fn navigation(user: &CurrentUser, current_path: &str) -> Vec<NavLink> {
    NAV.iter()
        .filter(|(_, _, roles)| user.has_any_role(roles))
        .map(|&(href, label, _)| NavLink {
            href,
            label,
            active: current_path.starts_with(href),
        })
        .collect()
}

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.user`, `ctx.nav`, etc.
pub struct PageContext {
    pub user: CurrentUser,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub nav: Vec<NavLink>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig, user: CurrentUser, current_path: &str) -> Self {
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        let nav = navigation(&user, current_path);
        Self {
            avatar_initial: user.avatar_initial(),
            user,
            flash,
            nav,
            app_name: config.app_name.clone(),
            csrf_token,
        }
    }
}

mod calendar;
mod common;
mod onboarding;

pub use self::calendar::{CalendarTemplate, EventFormValues};
pub use self::common::{DashboardTemplate, SettingsTemplate};
pub use self::onboarding::{ExhibitorWizardTemplate, OnboardingDoneTemplate, SocietyWizardTemplate};
