//! Registration form and its validation schema.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::types::{NonEmptyString, Password, UserEmail, UserRole};
use crate::domain::user::NewUser;
use crate::forms::{FieldErrors, FormError};

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email address.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const ROLE_REQUIRED: &str = "Select a user type.";

/// Raw registration input as typed by the user.
///
/// The password is never serialized so re-rendered pages do not echo it back.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq, Eq)]
pub struct RegisterUserForm {
    #[serde(default, alias = "nome")]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default, alias = "senha", skip_serializing)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
    #[serde(default, alias = "tipo_usuario")]
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(NAME_REQUIRED)));
    }
    Ok(())
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<UserRole>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("role").with_message(Cow::Borrowed(ROLE_REQUIRED)))
}

impl RegisterUserForm {
    /// Trims the free-text fields; the password is kept as typed.
    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role.trim().to_string(),
        }
    }

    /// Runs the schema and returns either the typed payload or one message per
    /// invalid field.
    pub fn to_payload(&self) -> Result<NewUser, FieldErrors> {
        NewUser::try_from(self.normalized()).map_err(|err| err.field_errors())
    }
}

impl TryFrom<RegisterUserForm> for NewUser {
    type Error = FormError;

    fn try_from(form: RegisterUserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = NonEmptyString::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        let password = Password::new(form.password).map_err(|_| FormError::InvalidPassword)?;
        let role = form
            .role
            .parse::<UserRole>()
            .map_err(|_| FormError::InvalidRole)?;

        Ok(NewUser::new(name, email, password, role))
    }
}
