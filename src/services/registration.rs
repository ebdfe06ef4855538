//! Registration form: validate-then-submit with one write per valid attempt.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::domain::user::{NewUser, User};
use crate::forms::FieldErrors;
use crate::forms::registration::RegisterUserForm;
use crate::repository::UserWriter;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::services::lifecycle::RequestState;
use crate::services::{ServiceError, ServiceResult};

pub const REGISTRATION_SUCCEEDED: &str = "User registered successfully!";
pub const REGISTRATION_FAILED: &str = "Could not register the user. Please try again.";
pub const REGISTRATION_IN_PROGRESS: &str =
    "A registration for this email is already being sent. Please wait.";

/// Registrations waiting for the API, shared by every worker.
///
/// Each POST builds its own [`RegistrationForm`], so the `Pending` state of one
/// request is invisible to the next. Claims keyed by email close that gap.
#[derive(Debug, Default)]
pub struct PendingRegistrations {
    emails: Mutex<HashSet<String>>,
}

impl PendingRegistrations {
    /// Marks `email` as in flight. Returns `None` if it already is.
    pub fn claim(&self, email: &str) -> Option<PendingClaim<'_>> {
        let mut emails = self.emails.lock().unwrap_or_else(PoisonError::into_inner);
        if !emails.insert(email.to_string()) {
            return None;
        }
        Some(PendingClaim {
            owner: self,
            email: email.to_string(),
        })
    }

    pub fn is_pending(&self, email: &str) -> bool {
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(email)
    }
}

/// Releases its email when dropped.
#[derive(Debug)]
pub struct PendingClaim<'a> {
    owner: &'a PendingRegistrations,
    email: String,
}

impl Drop for PendingClaim<'_> {
    fn drop(&mut self) {
        self.owner
            .emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.email);
    }
}

/// Input fields of the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
    Role,
}

/// State of the registration form between user interactions.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    values: RegisterUserForm,
    errors: FieldErrors,
    submission: RequestState<User, String>,
}

impl RegistrationForm {
    /// Empty form, as shown on first render.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with values posted by the browser.
    pub fn with_values(values: RegisterUserForm) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &RegisterUserForm {
        &self.values
    }

    /// Validation messages from the last submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submission(&self) -> &RequestState<User, String> {
        &self.submission
    }

    /// The submit control is disabled while a submission is pending.
    pub fn is_submit_enabled(&self) -> bool {
        !self.submission.is_pending()
    }

    /// Records one keystroke or selection.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.values.name = value,
            FormField::Email => self.values.email = value,
            FormField::Password => self.values.password = value,
            FormField::Role => self.values.role = value,
        }
    }

    /// Validates the current values and, when they pass, moves to `Pending`.
    ///
    /// Returns the payload to send. Nothing should be sent on error.
    pub fn begin_submit(&mut self) -> ServiceResult<NewUser> {
        if self.submission.is_pending() {
            return Err(ServiceError::InFlight);
        }

        match self.values.to_payload() {
            Ok(payload) => {
                self.errors.clear();
                self.submission.begin();
                Ok(payload)
            }
            Err(errors) => {
                log::debug!("Registration form rejected: {errors:?}");
                self.errors = errors.clone();
                self.submission.reset();
                Err(ServiceError::Form(errors))
            }
        }
    }

    /// Applies the API outcome of the pending submission.
    ///
    /// Success clears every field; failure keeps them so the user can retry.
    pub fn finish_submit(&mut self, outcome: RepositoryResult<User>) -> ServiceResult<User> {
        if !self.submission.is_pending() {
            log::warn!("Ignoring registration outcome without a pending submission");
            return Err(ServiceError::Rejected(REGISTRATION_FAILED.to_string()));
        }

        match outcome {
            Ok(user) => {
                self.values = RegisterUserForm::default();
                self.submission.succeed(user.clone());
                Ok(user)
            }
            Err(err) => {
                log::error!("Failed to register user: {err}");
                let message = user_facing_message(&err);
                self.submission.fail(message.clone());
                Err(ServiceError::Rejected(message))
            }
        }
    }

    /// Validates, sends and applies the outcome of one submit click.
    pub async fn submit<R>(&mut self, repo: &R) -> ServiceResult<User>
    where
        R: UserWriter + ?Sized,
    {
        let payload = self.begin_submit()?;
        let outcome = repo.create_user(&payload).await;
        self.finish_submit(outcome)
    }

    /// Like [`submit`](Self::submit), but refuses while another request is
    /// already sending the same email.
    pub async fn submit_exclusive<R>(
        &mut self,
        repo: &R,
        pending: &PendingRegistrations,
    ) -> ServiceResult<User>
    where
        R: UserWriter + ?Sized,
    {
        let payload = self.begin_submit()?;
        let Some(_claim) = pending.claim(payload.email.as_str()) else {
            log::warn!("Registration for {} already in flight", payload.email);
            self.submission.fail(REGISTRATION_IN_PROGRESS.to_string());
            return Err(ServiceError::InFlight);
        };
        let outcome = repo.create_user(&payload).await;
        self.finish_submit(outcome)
    }

    /// Message to show next to the form after the last submission.
    pub fn notice(&self) -> Option<&str> {
        match &self.submission {
            RequestState::Success(_) => Some(REGISTRATION_SUCCEEDED),
            RequestState::Failure(message) => Some(message.as_str()),
            RequestState::Idle | RequestState::Pending => None,
        }
    }
}

/// Prefers the sanitized server message, falling back to a generic one.
fn user_facing_message(err: &RepositoryError) -> String {
    err.server_message()
        .map(ammonia::clean)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .map(|message| format!("Could not register the user: {message}"))
        .unwrap_or_else(|| REGISTRATION_FAILED.to_string())
}
