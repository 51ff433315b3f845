// Error types
// -----------
// Every stage returns a `SeedResult`; only the binary decides whether an
// error ends the process and with which exit code.

use thiserror::Error;

/// Result type used across the crate
pub type SeedResult<T> = Result<T, SeedError>;

/// Fatal failures of a seeding run. Soft failures (a missing `id`, an
/// unknown habit name) are reported by the stages and never become errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API is not accessible at {base_url}")]
    Unreachable { base_url: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SeedError {
    /// Create an API error from a response status and raw body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Connection failures, timeouts and server-side errors may succeed on
    /// a later attempt.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SeedError::Http(e) => e.is_connect() || e.is_timeout(),
            SeedError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// True when the request never reached the server, so repeating it
    /// cannot create a duplicate record.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, SeedError::Http(e) if e.is_connect())
    }

    /// Process exit code for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            SeedError::Unreachable { .. } => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_constructor() {
        let err = SeedError::api(404, "not found");
        match err {
            SeedError::Api { status, ref body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
            }
            _ => panic!("Expected Api variant"),
        }
        assert_eq!(err.to_string(), "Request failed with status 404: not found");
    }

    #[test]
    fn test_server_errors_are_transient() {
        assert!(SeedError::api(500, "").is_transient());
        assert!(SeedError::api(503, "").is_transient());
        assert!(!SeedError::api(400, "").is_transient());
        assert!(!SeedError::api(404, "").is_transient());
    }

    #[test]
    fn test_non_http_errors_are_not_transient() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!SeedError::from(json).is_transient());
        assert!(!SeedError::config("bad").is_transient());
        assert!(!SeedError::Unreachable {
            base_url: "http://localhost:8080".into()
        }
        .is_transient());
    }

    #[test]
    fn test_exit_codes() {
        let unreachable = SeedError::Unreachable {
            base_url: "http://localhost:8080".into(),
        };
        assert_eq!(unreachable.exit_code(), 1);
        assert_eq!(SeedError::api(400, "").exit_code(), 2);
        assert_eq!(SeedError::config("x").exit_code(), 2);
    }
}
