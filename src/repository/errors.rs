use thiserror::Error;

/// Failures reported by the remote user API.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API responded with status {status}: {}", message.as_deref().unwrap_or("<no message>"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid API url: {0}")]
    InvalidUrl(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Message supplied by the server alongside a non-2xx response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RepositoryError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Extracts a human readable message from a JSON error body.
///
/// Looks at `message`, then `error`, and gives up on anything else so raw
/// upstream bodies never reach the user.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| json.get(key).and_then(|value| value.as_str()))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

#[cfg(feature = "server")]
impl From<url::ParseError> for RepositoryError {
    fn from(err: url::ParseError) -> Self {
        RepositoryError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_then_error_keys() {
        assert_eq!(
            extract_error_message(r#"{"message":"Email already taken"}"#).as_deref(),
            Some("Email already taken")
        );
        assert_eq!(
            extract_error_message(r#"{"error":"Bad role"}"#).as_deref(),
            Some("Bad role")
        );
        assert_eq!(
            extract_error_message(r#"{"message":"  ","error":"fallback"}"#).as_deref(),
            Some("fallback")
        );
    }

    #[test]
    fn ignores_non_json_bodies() {
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(r#"{"detail":"x"}"#), None);
    }

    #[test]
    fn server_message_only_for_status_errors() {
        let status = RepositoryError::Status {
            status: 409,
            message: Some("duplicate".to_string()),
        };
        assert_eq!(status.server_message(), Some("duplicate"));
        assert_eq!(
            RepositoryError::Transport("down".to_string()).server_message(),
            None
        );
    }
}
