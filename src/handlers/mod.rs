pub mod calendar_handlers;
pub mod dashboard;
pub mod onboarding_handlers;
pub mod settings_handlers;
