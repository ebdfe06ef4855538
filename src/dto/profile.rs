//! DTOs shaped for the user profile template.

use serde::Serialize;

use crate::domain::user::User;

/// Rendering mode of the profile page. Exactly one is active at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProfileView {
    Loading,
    Error { message: String },
    NotFound,
    Loaded { user: User },
}

impl ProfileView {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProfileView::Loading)
    }

    /// The loaded record, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            ProfileView::Loaded { user } => Some(user),
            _ => None,
        }
    }
}
