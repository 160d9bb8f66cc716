use actix_session::Session;
use std::future::Future;

use crate::errors::AppError;
use crate::state::AsyncState;
use crate::store::StoreError;
use crate::wizard::{FORM_ERROR_KEY, FormWizard, WizardForm};

/// Seconds the confirmation page stays up before navigating away.
pub const REDIRECT_DELAY_SECS: u64 = 2;
pub const DONE_REDIRECT: &str = "/dashboard";

/// `CookieSessionStore` refuses session state above 4064 bytes; the rest is
/// left for flash messages and sign-in keys written later.
const SESSION_STATE_BUDGET: usize = 3584;
pub const OVERSIZED_MESSAGE: &str =
    "This form holds more text than can be kept between steps. Please shorten the longer fields.";

/// Prefix of the text inputs feeding `add:<list>` actions.
const NEW_ITEM_PREFIX: &str = "new_item.";
const CONTROL_FIELDS: &[&str] = &["csrf_token", "action"];

/// Button pressed on a wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Previous,
    Submit,
    Cancel,
    Add(String),
    Remove(String, usize),
}

impl WizardAction {
    /// `next`, `previous`, `submit`, `cancel`, `add:<list>`, `remove:<list>:<index>`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "next" => Some(WizardAction::Next),
            "previous" => Some(WizardAction::Previous),
            "submit" => Some(WizardAction::Submit),
            "cancel" => Some(WizardAction::Cancel),
            other => {
                if let Some(list) = other.strip_prefix("add:") {
                    return Some(WizardAction::Add(list.to_string()));
                }
                let (list, index) = other.strip_prefix("remove:")?.rsplit_once(':')?;
                Some(WizardAction::Remove(list.to_string(), index.parse().ok()?))
            }
        }
    }
}

/// What the handler should do after a wizard POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// Save the wizard and show the (possibly new) step again.
    Continue,
    Cancelled,
    Created(String),
}

pub fn field_value<'a>(params: &'a [(String, String)], key: &str) -> &'a str {
    params
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

/// Copy posted step fields into the wizard, in posting order so a checkbox
/// after its hidden `false` input wins.
pub fn apply_fields<F: WizardForm>(wizard: &mut FormWizard<F>, params: &[(String, String)]) {
    for (key, value) in params {
        if CONTROL_FIELDS.contains(&key.as_str()) || key.starts_with(NEW_ITEM_PREFIX) {
            continue;
        }
        if let Err(e) = wizard.handle_input_change(key, value) {
            log::warn!("Ignoring posted wizard field: {e}");
        }
    }
}

/// Apply one wizard POST: fields first, then the pressed button.
pub async fn apply_post<F, C, Fut>(
    wizard: &mut FormWizard<F>,
    params: &[(String, String)],
    create: C,
) -> PostOutcome
where
    F: WizardForm,
    C: FnOnce(F) -> Fut,
    Fut: Future<Output = Result<String, StoreError>>,
{
    apply_fields(wizard, params);

    let raw = field_value(params, "action");
    let Some(action) = WizardAction::parse(raw) else {
        log::warn!("Unknown wizard action '{raw}'");
        return PostOutcome::Continue;
    };

    match action {
        WizardAction::Next => {
            wizard.next();
        }
        WizardAction::Previous => wizard.previous(),
        WizardAction::Cancel => return PostOutcome::Cancelled,
        WizardAction::Add(list) => {
            let value = field_value(params, &format!("{NEW_ITEM_PREFIX}{list}"));
            if let Err(e) = wizard.add_item(&list, value) {
                log::warn!("Ignoring add action: {e}");
            }
        }
        WizardAction::Remove(list, index) => {
            if let Err(e) = wizard.remove_item(&list, index) {
                log::warn!("Ignoring remove action: {e}");
            }
        }
        WizardAction::Submit if !wizard.is_last_step() => {
            wizard.next();
        }
        WizardAction::Submit => {
            if let AsyncState::Succeeded(id) = wizard.submit(create).await {
                return PostOutcome::Created(id.clone());
            }
        }
    }
    PostOutcome::Continue
}

/// The wizard in progress under `key`, or a fresh one.
pub fn load_wizard<F: WizardForm>(session: &Session, key: &str) -> FormWizard<F> {
    match session.get::<FormWizard<F>>(key) {
        Ok(Some(wizard)) => wizard,
        Ok(None) => FormWizard::default(),
        Err(e) => {
            log::warn!("Discarding unreadable wizard state '{key}': {e}");
            session.remove(key);
            FormWizard::default()
        }
    }
}

/// Whether the session still fits its cookie once `wizard` is stored under `key`.
pub fn fits_session<F: WizardForm>(session: &Session, key: &str, wizard: &FormWizard<F>) -> bool {
    let Ok(value) = serde_json::to_string(wizard) else {
        return false;
    };
    let mut state = session.entries().clone();
    state.insert(key.to_string(), value);
    serde_json::to_string(&state).is_ok_and(|s| s.len() <= SESSION_STATE_BUDGET)
}

/// Keep the user on `step` with a form-level message next to whatever field
/// errors the action produced. The session keeps the previous state.
pub fn reject_oversized<F: WizardForm>(wizard: &mut FormWizard<F>, step: u8) {
    wizard.return_to_step(step);
    wizard.errors.insert(FORM_ERROR_KEY, OVERSIZED_MESSAGE);
}

pub fn save_wizard<F: WizardForm>(
    session: &Session,
    key: &str,
    wizard: &FormWizard<F>,
) -> Result<(), AppError> {
    session
        .insert(key, wizard)
        .map_err(|e| AppError::Session(format!("Failed to store wizard state: {e}")))
}

pub fn clear_wizard(session: &Session, key: &str) {
    session.remove(key);
}
