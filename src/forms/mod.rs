//! Form definitions backing the front-end routes.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

pub mod registration;

/// Human readable validation messages keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid password")]
    InvalidPassword,

    #[error("invalid role")]
    InvalidRole,
}

impl FormError {
    /// Flattens the error into one message per offending field.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .filter_map(|(field, errors)| {
                    let first = errors.first()?;
                    let message = first
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| first.code.to_string());
                    Some((field.to_string(), message))
                })
                .collect(),
            FormError::InvalidName => single("name", registration::NAME_REQUIRED),
            FormError::InvalidEmail => single("email", registration::EMAIL_INVALID),
            FormError::InvalidPassword => single("password", registration::PASSWORD_TOO_SHORT),
            FormError::InvalidRole => single("role", registration::ROLE_REQUIRED),
        }
    }
}

fn single(field: &str, message: &str) -> FieldErrors {
    FieldErrors::from([(field.to_string(), message.to_string())])
}
