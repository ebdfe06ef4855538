//! Access to the remote user API.
//!
//! Services only see the [`UserReader`] and [`UserWriter`] traits so the HTTP
//! client can be swapped for fakes in tests.

use async_trait::async_trait;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[cfg(feature = "server")]
pub use http::HttpRepository;

#[async_trait]
pub trait UserReader {
    /// `GET /users/{id}`. `Ok(None)` when the API answers with an empty body.
    async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
}

#[async_trait]
pub trait UserWriter {
    /// `POST /users`, returning the record created by the API.
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}
