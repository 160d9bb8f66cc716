use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::{ONBOARDING_ROLES, require_any_role, set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::onboarding::register_exhibitor;
use crate::store::TableStore;
use crate::templates_structs::{ExhibitorWizardTemplate, OnboardingDoneTemplate, PageContext};
use crate::wizard::ExhibitorForm;

use super::helpers::{
    DONE_REDIRECT, PostOutcome, REDIRECT_DELAY_SECS, apply_post, clear_wizard, field_value,
    fits_session, load_wizard, reject_oversized, save_wizard,
};

const WIZARD_KEY: &str = "wizard.exhibitor";
const PATH: &str = "/onboarding/exhibitor";

/// GET /onboarding/exhibitor: the current step of the wizard in progress.
pub async fn form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, ONBOARDING_ROLES)?;
    let wizard = load_wizard::<ExhibitorForm>(&session, WIZARD_KEY);
    let ctx = PageContext::build(&session, &config, user, PATH);
    render(ExhibitorWizardTemplate { ctx, wizard })
}

/// POST /onboarding/exhibitor
pub async fn submit<S: TableStore + 'static>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let user = require_any_role(&session, ONBOARDING_ROLES)?;
    let params = form.into_inner();
    csrf::validate_csrf(&session, field_value(&params, "csrf_token"))?;

    let mut wizard = load_wizard::<ExhibitorForm>(&session, WIZARD_KEY);
    let step = wizard.current_step();
    let creator = user.identity().to_string();
    let outcome = apply_post(&mut wizard, &params, move |form| async move {
        register_exhibitor(store.get_ref(), form, &creator).await
    })
    .await;

    match outcome {
        PostOutcome::Created(id) => {
            log::info!(
                "{} onboarded exhibitor '{}' as user {id}",
                user.identity(),
                wizard.form.company_name
            );
            clear_wizard(&session, WIZARD_KEY);
            let message = format!("{} has been added as an exhibitor.", wizard.form.company_name.trim());
            let ctx = PageContext::build(&session, &config, user, PATH);
            render(OnboardingDoneTemplate {
                ctx,
                title: "Exhibitor created".to_string(),
                message,
                redirect_to: DONE_REDIRECT.to_string(),
                delay_secs: REDIRECT_DELAY_SECS,
            })
        }
        PostOutcome::Cancelled => {
            clear_wizard(&session, WIZARD_KEY);
            set_flash(&session, "Exhibitor onboarding cancelled");
            Ok(see_other(DONE_REDIRECT))
        }
        PostOutcome::Continue if fits_session(&session, WIZARD_KEY, &wizard) => {
            save_wizard(&session, WIZARD_KEY, &wizard)?;
            Ok(see_other(PATH))
        }
        PostOutcome::Continue => {
            log::warn!("Exhibitor wizard state too large for the session cookie");
            reject_oversized(&mut wizard, step);
            let ctx = PageContext::build(&session, &config, user, PATH);
            render(ExhibitorWizardTemplate { ctx, wizard })
        }
    }
}
