//! Request lifecycle shared by the profile viewer and the registration form.
//!
//! `Idle -> Pending -> {Success, Failure}`. `Pending` is entered once per user
//! action; `Success` and `Failure` are terminal until the next action starts.

use serde::Serialize;

/// State of one user-triggered request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState<T, E> {
    Idle,
    Pending,
    Success(T),
    Failure(E),
}

impl<T, E> Default for RequestState<T, E> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T, E> RequestState<T, E> {
    /// Starts a new action. Returns `false` when one is already pending.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = RequestState::Pending;
        true
    }

    /// Completes the pending action successfully.
    ///
    /// Ignored unless the state is `Pending`.
    pub fn succeed(&mut self, value: T) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = RequestState::Success(value);
        true
    }

    /// Completes the pending action with a failure.
    ///
    /// Ignored unless the state is `Pending`.
    pub fn fail(&mut self, error: E) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = RequestState::Failure(error);
        true
    }

    /// Drops any terminal outcome and goes back to `Idle`.
    pub fn reset(&mut self) {
        *self = RequestState::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            RequestState::Failure(error) => Some(error),
            _ => None,
        }
    }
}
