pub mod calendar;
pub mod event;
pub mod onboarding;
pub mod settings;
