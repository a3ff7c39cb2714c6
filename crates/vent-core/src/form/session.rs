//! Form session state machine.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::errors::FieldErrors;
use super::field::{Field, FieldRule};
use super::LeadForm;

/// Submission lifecycle of a form.
///
/// `Idle --submit(valid)--> Submitted --reset--> Idle`. An invalid submit
/// keeps the form `Idle` with its errors populated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormStatus {
    /// Accepting input.
    #[default]
    Idle,
    /// Validated and handed to the submit callback.
    Submitted,
}

/// Input state, validation errors and submission status of one mounted form.
///
/// The session owns the current field values and the rules they are checked
/// against. Edits clear the edited field's error immediately; everything is
/// re-validated on the next submit.
///
/// # Example
///
/// ```
/// use vent_core::form::{ConsultationRequest, FormSession, FormStatus};
///
/// let mut form = FormSession::<ConsultationRequest>::for_form();
/// assert!(!form.submit(|_| {}));
/// assert_eq!(form.errors().len(), 4);
///
/// form.set_field(ConsultationRequest::NAME, "Ann");
/// form.set_field(ConsultationRequest::PHONE, "123");
/// form.set_field(ConsultationRequest::EMAIL, "a@b.com");
/// form.set_field(ConsultationRequest::AGREEMENT, true);
/// assert!(form.submit(|fields| assert_eq!(fields.name, "Ann")));
/// assert_eq!(form.status(), FormStatus::Submitted);
/// ```
#[derive(Debug)]
pub struct FormSession<F> {
    initial: F,
    fields: F,
    errors: FieldErrors,
    status: FormStatus,
    rules: Vec<FieldRule<F>>,
}

impl<F: Clone> FormSession<F> {
    /// Mounts a form with `initial` values and the rules to check on submit.
    pub fn new(initial: F, rules: Vec<FieldRule<F>>) -> Self {
        Self {
            fields: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            status: FormStatus::Idle,
            rules,
        }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_submitted(&self) -> bool {
        self.status == FormStatus::Submitted
    }

    pub fn value<T>(&self, field: Field<F, T>) -> &T {
        field.get(&self.fields)
    }

    pub fn error_for<T>(&self, field: Field<F, T>) -> Option<&str> {
        self.errors.get(field.name())
    }

    /// Updates one field and clears its error, if any.
    pub fn set_field<T>(&mut self, field: Field<F, T>, value: impl Into<T>) {
        field.set(&mut self.fields, value.into());
        self.errors.remove(field.name());
    }

    /// Checks the current values against every rule.
    ///
    /// Pure: the session's stored errors are left untouched.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for rule in &self.rules {
            if errors.contains(rule.field()) {
                continue;
            }
            if let Some(message) = rule.check(&self.fields) {
                errors.insert_first(rule.field(), message);
            }
        }
        errors
    }

    /// Validates and, when valid, hands the fields to `on_valid`.
    ///
    /// Returns `true` when the form is submitted. Calling `submit` on a form
    /// that is already submitted does nothing and returns `true`; the callback
    /// is not invoked a second time.
    pub fn submit<C>(&mut self, on_valid: C) -> bool
    where
        C: FnOnce(&F),
    {
        if self.is_submitted() {
            tracing::debug!(
                form = std::any::type_name::<F>(),
                "Ignoring submit on an already submitted form"
            );
            return true;
        }

        let errors = self.validate();
        if !errors.is_empty() {
            tracing::debug!(
                form = std::any::type_name::<F>(),
                invalid = errors.len(),
                "Form submit rejected by validation"
            );
            self.errors = errors;
            return false;
        }

        self.errors.clear();
        on_valid(&self.fields);
        self.status = FormStatus::Submitted;
        true
    }

    /// Restores the initial values, clears errors and returns to `Idle`.
    pub fn reset(&mut self) {
        self.fields = self.initial.clone();
        self.errors.clear();
        self.status = FormStatus::Idle;
    }
}

impl<F: LeadForm> FormSession<F> {
    /// Mounts a lead form with its default values.
    pub fn for_form() -> Self {
        Self::prefilled(F::default())
    }

    /// Mounts a lead form with the given starting values, e.g. an inquiry
    /// opened from a product card. `reset` returns to these values.
    pub fn prefilled(initial: F) -> Self {
        Self::new(initial, F::rules())
    }
}

impl<F: LeadForm> Default for FormSession<F> {
    fn default() -> Self {
        Self::for_form()
    }
}
