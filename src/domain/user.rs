use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, Password, UserEmail, UserId, UserRole};

/// User profile as returned by the remote API.
///
/// The front end only keeps a read-only copy, so text fields are stored exactly
/// as received.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    #[serde(alias = "nome")]
    pub name: String,
    pub email: String,
    #[serde(alias = "tipo_usuario")]
    pub role: UserRole,
}

/// Validated registration payload sent to `POST /users`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: NonEmptyString,
    pub email: UserEmail,
    pub password: Password,
    pub role: UserRole,
}

impl NewUser {
    #[must_use]
    pub fn new(name: NonEmptyString, email: UserEmail, password: Password, role: UserRole) -> Self {
        Self {
            name,
            email,
            password,
            role,
        }
    }
}
