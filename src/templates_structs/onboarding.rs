use askama::Template;

use crate::wizard::{ExhibitorForm, FormWizard, SocietyForm};
use super::PageContext;

#[derive(Template)]
#[template(path = "onboarding/exhibitor.html")]
pub struct ExhibitorWizardTemplate {
    pub ctx: PageContext,
    pub wizard: FormWizard<ExhibitorForm>,
}

#[derive(Template)]
#[template(path = "onboarding/society.html")]
pub struct SocietyWizardTemplate {
    pub ctx: PageContext,
    pub wizard: FormWizard<SocietyForm>,
}

/// Confirmation shown after a successful onboarding; the page itself
/// navigates to `redirect_to` after `delay_secs`.
#[derive(Template)]
#[template(path = "onboarding/done.html")]
pub struct OnboardingDoneTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub message: String,
    pub redirect_to: String,
    pub delay_secs: u64,
}
