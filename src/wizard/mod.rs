//! Multi-step onboarding forms.
//!
//! `FormWizard` drives any `WizardForm` through its steps: forward navigation
//! is gated on the active step's validation, edits clear the touched field's
//! error, and submission re-validates the final step before handing a copy of
//! the form to the caller's create call.

pub mod exhibitor;
pub mod society;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use crate::state::AsyncState;
use crate::store::StoreError;

pub use exhibitor::ExhibitorForm;
pub use society::SocietyForm;

/// Error key used for the submission failure message.
pub const SUBMIT_ERROR_KEY: &str = "submit";
/// Error key for problems with the form as a whole.
pub const FORM_ERROR_KEY: &str = "form";

/// Field name to message, recomputed per validation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` under `field` when a validator returned one.
    pub fn check(&mut self, field: &str, message: Option<String>) {
        if let Some(msg) = message {
            self.0.insert(field.to_string(), msg);
        }
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&String> {
        self.0.get(field)
    }

    /// Message for `field`, or `""` (templates test `is_empty()`).
    pub fn message(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Write to a path the form does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Unknown(String),
    NotAList(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Unknown(path) => write!(f, "unknown field '{path}'"),
            FieldError::NotAList(path) => write!(f, "'{path}' is not a list field"),
        }
    }
}

impl std::error::Error for FieldError {}

/// Checkbox values as posted by the wizard templates.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "on" | "1" | "yes")
}

/// A typed form driven by `FormWizard`.
pub trait WizardForm: Clone + Default + Serialize + DeserializeOwned {
    /// Number of steps; steps are numbered `1..=STEPS`.
    const STEPS: u8;
    /// Generic message stored under `submit` when the create call fails.
    const SUBMIT_ERROR: &'static str;

    fn step_title(step: u8) -> &'static str;

    /// Errors for the fields belonging to `step` only.
    fn validate_step(&self, step: u8) -> ValidationErrors;

    /// Set a scalar field by path; nested groups use `"group.field"`.
    fn set_field(&mut self, path: &str, value: &str) -> Result<(), FieldError>;

    /// Error key that covers the list `field` when lists are validated together.
    fn list_error_key(field: &str) -> &str {
        field
    }

    /// The dynamic list stored under `field`.
    fn list_mut(&mut self, field: &str) -> Result<&mut Vec<String>, FieldError>;
}

/// Step tab shown above the wizard.
#[derive(Debug, Clone)]
pub struct StepTab {
    pub number: u8,
    pub title: &'static str,
    pub is_current: bool,
    pub is_done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormWizard<F> {
    pub form: F,
    current_step: u8,
    pub errors: ValidationErrors,
    /// Outcome of the last `submit` in this request; never stored.
    #[serde(skip)]
    submission: AsyncState<String>,
}

impl<F: WizardForm> Default for FormWizard<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: WizardForm> FormWizard<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            current_step: 1,
            errors: ValidationErrors::new(),
            submission: AsyncState::Idle,
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn total_steps(&self) -> u8 {
        F::STEPS
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == F::STEPS
    }

    pub fn steps(&self) -> Vec<StepTab> {
        (1..=F::STEPS)
            .map(|n| StepTab {
                number: n,
                title: F::step_title(n),
                is_current: n == self.current_step,
                is_done: n < self.current_step,
            })
            .collect()
    }

    /// Replace the error map with `step`'s errors; true when there are none.
    pub fn validate_step(&mut self, step: u8) -> bool {
        self.errors = self.form.validate_step(step);
        self.errors.is_empty()
    }

    pub fn handle_input_change(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        self.form.set_field(path, value)?;
        self.errors.remove(path);
        Ok(())
    }

    /// Advance when the current step validates. Returns whether the step changed.
    pub fn next(&mut self) -> bool {
        if !self.validate_step(self.current_step) {
            return false;
        }
        let before = self.current_step;
        self.current_step = (self.current_step + 1).min(F::STEPS);
        self.current_step != before
    }

    pub fn previous(&mut self) {
        self.current_step = self.current_step.saturating_sub(1).max(1);
    }

    /// Undo a step change made by a request whose state cannot be kept.
    pub(crate) fn return_to_step(&mut self, step: u8) {
        self.current_step = step.clamp(1, F::STEPS);
    }

    /// Append a trimmed value to a list field. Empty and duplicate values are
    /// ignored; returns whether the list grew.
    pub fn add_item(&mut self, field: &str, value: &str) -> Result<bool, FieldError> {
        let list = self.form.list_mut(field)?;
        let value = value.trim();
        if value.is_empty() || list.iter().any(|existing| existing == value) {
            return Ok(false);
        }
        list.push(value.to_string());
        self.errors.remove(field);
        self.errors.remove(F::list_error_key(field));
        Ok(true)
    }

    /// Remove the entry at `index`; out-of-range indexes are ignored.
    pub fn remove_item(&mut self, field: &str, index: usize) -> Result<bool, FieldError> {
        let list = self.form.list_mut(field)?;
        if index >= list.len() {
            return Ok(false);
        }
        list.remove(index);
        Ok(true)
    }

    /// Validate the current step and, when clean, run `create` on a copy of
    /// the form. A failure leaves the wizard editable with a generic message
    /// under `submit`.
    pub async fn submit<C, Fut>(&mut self, create: C) -> &AsyncState<String>
    where
        C: FnOnce(F) -> Fut,
        Fut: Future<Output = Result<String, StoreError>>,
    {
        if !self.validate_step(self.current_step) {
            return &self.submission;
        }

        self.submission = AsyncState::Pending;
        match create(self.form.clone()).await {
            Ok(id) => {
                log::info!("Onboarding submission stored as {id}");
                self.submission = AsyncState::Succeeded(id);
            }
            Err(e) => {
                log::error!("Onboarding submission failed: {e}");
                self.errors.insert(SUBMIT_ERROR_KEY, F::SUBMIT_ERROR);
                self.submission = AsyncState::Failed(e.to_string());
            }
        }
        &self.submission
    }
}
