//! `reqwest` implementation of the repository traits.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult, extract_error_message};
use crate::repository::{UserReader, UserWriter};

/// Remote user API reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
}

impl HttpRepository {
    /// Creates a repository rooted at `base_url` (e.g. `https://api.reuse.example/v1`).
    pub fn new(base_url: &str) -> RepositoryResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a repository that reuses an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: &str) -> RepositoryResult<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// Builds `{base_url}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> RepositoryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RepositoryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Maps non-2xx responses to a [`RepositoryError`].
    async fn check_response(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RepositoryError::Status {
            status: status.as_u16(),
            message: extract_error_message(&body),
        })
    }
}

#[async_trait]
impl UserReader for HttpRepository {
    async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>> {
        let url = self.endpoint(&["users", id.as_str()])?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let body = Self::check_response(response).await?.text().await?;

        let body = body.trim();
        if body.is_empty() || body == "null" {
            return Ok(None);
        }

        serde_json::from_str(body)
            .map(Some)
            .map_err(|err| RepositoryError::Decode(err.to_string()))
    }
}

#[async_trait]
impl UserWriter for HttpRepository {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let url = self.endpoint(&["users"])?;
        log::debug!("POST {url}");

        let response = self.client.post(url).json(new_user).send().await?;
        let body = Self::check_response(response).await?.text().await?;

        serde_json::from_str(&body).map_err(|err| RepositoryError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::types::{NonEmptyString, Password, UserEmail, UserRole};

    fn new_user() -> NewUser {
        NewUser::new(
            NonEmptyString::new("Ana").unwrap(),
            UserEmail::new("ana@example.com").unwrap(),
            Password::new("secret1").unwrap(),
            UserRole::Donor,
        )
    }

    #[test]
    fn rejects_urls_that_cannot_be_a_base() {
        assert!(matches!(
            HttpRepository::new("mailto:api@example.com"),
            Err(RepositoryError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpRepository::new("not a url"),
            Err(RepositoryError::InvalidUrl(_))
        ));
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let repo = HttpRepository::new("http://localhost:3333/api/").unwrap();
        let url = repo.endpoint(&["users", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/users/a%2Fb%20c");
    }

    #[tokio::test]
    async fn get_user_decodes_record() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "name": "Ana",
                "email": "ana@example.com",
                "role": "donor"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let repo = HttpRepository::new(&mock_server.uri()).unwrap();
        let user = repo
            .get_user_by_id(&UserId::new("7").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.id.as_str(), "7");
        assert_eq!(user.name, "Ana");
        assert_eq!(user.role, UserRole::Donor);
    }

    #[tokio::test]
    async fn get_user_null_body_is_none() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/9"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let repo = HttpRepository::new(&mock_server.uri()).unwrap();
        let user = repo
            .get_user_by_id(&UserId::new("9").unwrap())
            .await
            .unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn get_user_maps_status_codes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/500"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})),
            )
            .mount(&mock_server)
            .await;

        let repo = HttpRepository::new(&mock_server.uri()).unwrap();

        let missing = repo.get_user_by_id(&UserId::new("404").unwrap()).await;
        assert!(matches!(missing, Err(RepositoryError::NotFound)));

        let broken = repo.get_user_by_id(&UserId::new("500").unwrap()).await;
        match broken {
            Err(RepositoryError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("db down"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_user_reports_malformed_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&mock_server)
            .await;

        let repo = HttpRepository::new(&mock_server.uri()).unwrap();
        let result = repo.get_user_by_id(&UserId::new("1").unwrap()).await;

        assert!(matches!(result, Err(RepositoryError::Decode(_))));
    }

    #[tokio::test]
    async fn create_user_posts_json_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "secret1",
                "role": "donor"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "u-1",
                "name": "Ana",
                "email": "ana@example.com",
                "role": "donor"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let repo = HttpRepository::new(&mock_server.uri()).unwrap();
        let created = repo.create_user(&new_user()).await.unwrap();

        assert_eq!(created.id.as_str(), "u-1");
    }

    #[tokio::test]
    async fn create_user_surfaces_server_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"message": "Email already registered"})),
            )
            .mount(&mock_server)
            .await;

        let repo = HttpRepository::new(&mock_server.uri()).unwrap();
        let err = repo.create_user(&new_user()).await.unwrap_err();

        assert_eq!(err.server_message(), Some("Email already registered"));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let repo = HttpRepository::new("http://127.0.0.1:9").unwrap();
        let result = repo.get_user_by_id(&UserId::new("1").unwrap()).await;

        assert!(matches!(result, Err(RepositoryError::Transport(_))));
    }
}
