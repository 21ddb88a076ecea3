//! Contact form state machine.
//!
//! `Editing -> Submitting -> Submitted`, with failures returning to `Editing` with a banner and
//! "send another" returning from `Submitted` to a blank `Editing`.

use std::collections::BTreeMap;

use crate::{
    contact::email::is_valid_email,
    contact::transport::{ContactTransport, SubmissionReceipt, SubmissionResult},
    i18n::locale::Locale,
    mail::payload::ContactPayload,
};

const SUBMIT_FAILED_KEY: &str = "contactForm.errors.submitFailed";

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Subject,
        Field::Message,
    ];
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn to_payload(&self) -> ContactPayload {
        let optional = |s: &str| (!s.trim().is_empty()).then(|| s.to_owned());
        ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: optional(&self.phone),
            subject: optional(&self.subject),
            message: self.message.clone(),
        }
    }
}

pub type FormErrors = BTreeMap<Field, String>;

/// Check required fields; messages come from the active language.
pub fn validate(state: &FormState, locale: &Locale) -> FormErrors {
    let mut errors = FormErrors::new();
    if state.name.trim().is_empty() {
        errors.insert(
            Field::Name,
            locale.translate("contactForm.validation.nameRequired"),
        );
    }
    if state.email.trim().is_empty() {
        errors.insert(
            Field::Email,
            locale.translate("contactForm.validation.emailRequired"),
        );
    } else if !is_valid_email(state.email.trim()) {
        errors.insert(
            Field::Email,
            locale.translate("contactForm.validation.emailInvalid"),
        );
    }
    if state.message.trim().is_empty() {
        errors.insert(
            Field::Message,
            locale.translate("contactForm.validation.messageRequired"),
        );
    }
    errors
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Editing { banner: Option<String> },
    Submitting,
    Submitted(SubmissionReceipt),
}

impl Default for FormPhase {
    fn default() -> Self {
        Self::Editing { banner: None }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ContactForm {
    state: FormState,
    errors: FormErrors,
    phase: FormPhase,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting)
    }

    pub fn banner(&self) -> Option<&str> {
        match &self.phase {
            FormPhase::Editing { banner } => banner.as_deref(),
            _ => None,
        }
    }

    /// Update one field. Ignored outside `Editing`.
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        let FormPhase::Editing { banner } = &mut self.phase else {
            return;
        };
        *banner = None;
        self.state.set(field, value);
        self.errors.remove(&field);
    }

    /// Validate and enter `Submitting`, returning the payload to send.
    ///
    /// Returns `None` when validation fails or a submission is already running.
    pub fn begin_submit(&mut self, locale: &Locale) -> Option<ContactPayload> {
        if !matches!(self.phase, FormPhase::Editing { .. }) {
            return None;
        }
        self.errors = validate(&self.state, locale);
        if !self.errors.is_empty() {
            tracing::debug!(invalid = self.errors.len(), "contact form rejected locally");
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(self.state.to_payload())
    }

    /// Apply the outcome of the request started by [`ContactForm::begin_submit`].
    pub fn finish_submit(&mut self, result: SubmissionResult, locale: &Locale) {
        if !self.is_submitting() {
            return;
        }
        self.phase = match result {
            SubmissionResult::Success(receipt) => FormPhase::Submitted(receipt),
            SubmissionResult::Failure { message } => FormPhase::Editing {
                banner: Some(message.unwrap_or_else(|| locale.translate(SUBMIT_FAILED_KEY))),
            },
        };
    }

    /// Clear everything after a confirmed submission.
    pub fn send_another(&mut self) {
        if matches!(self.phase, FormPhase::Submitted(_)) {
            *self = Self::default();
        }
    }

    /// Run a whole submission through `transport`.
    pub async fn submit(&mut self, transport: &dyn ContactTransport, locale: &Locale) -> &FormPhase {
        if let Some(payload) = self.begin_submit(locale) {
            let result = transport.submit(&payload).await;
            self.finish_submit(result, locale);
        }
        &self.phase
    }
}

/// Entry of the subject selector.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubjectOption {
    pub value: String,
    pub label: String,
}

/// Subject choices in the active language; empty if the table has none.
pub fn subject_options(locale: &Locale) -> Vec<SubjectOption> {
    locale
        .table()
        .get(locale.language(), "contactForm.subjects")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
