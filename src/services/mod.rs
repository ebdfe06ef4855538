//! Front-end workflows, independent of the web framework.

use thiserror::Error;

use crate::forms::FieldErrors;

pub mod lifecycle;
pub mod profile;
pub mod registration;

/// Errors surfaced by service workflows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Client-side validation failed; nothing was sent.
    #[error("form validation failed for {} field(s)", .0.len())]
    Form(FieldErrors),

    /// A previous submission is still waiting for the API.
    #[error("a submission is already in progress")]
    InFlight,

    /// The API refused the request. Carries the user-facing message.
    #[error("request rejected: {0}")]
    Rejected(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
