//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{UserReader, UserWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl UserReader for Repository {
        async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>>;
    }

    #[async_trait]
    impl UserWriter for Repository {
        async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}
