//! DTOs shaped for the registration template.

use serde::Serialize;

use crate::domain::types::UserRole;
use crate::forms::FieldErrors;
use crate::forms::registration::RegisterUserForm;
use crate::services::registration::RegistrationForm;

/// One `<option>` of the role select.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Data required to render the registration page.
#[derive(Debug, Serialize)]
pub struct RegistrationPageData {
    pub values: RegisterUserForm,
    pub errors: FieldErrors,
    pub roles: Vec<RoleOption>,
    pub submit_enabled: bool,
    /// Failure message from the last submission, already sanitized.
    pub error_message: Option<String>,
}

impl From<&RegistrationForm> for RegistrationPageData {
    fn from(form: &RegistrationForm) -> Self {
        let values = form.values().clone();
        let selected_role = values.role.parse::<UserRole>().ok();
        let roles = UserRole::ALL
            .iter()
            .map(|role| RoleOption {
                value: role.as_str(),
                label: role.label(),
                selected: selected_role == Some(*role),
            })
            .collect();

        Self {
            values,
            errors: form.errors().clone(),
            roles,
            submit_enabled: form.is_submit_enabled(),
            error_message: form.submission().failure().cloned(),
        }
    }
}
