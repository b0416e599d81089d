//! Errors surfaced through list controller state.
//!
//! Fetch failures never escape an intent call. They are converted into a
//! [`ListError`] and stored on the controller so views can render them, which
//! is why every variant carries owned strings and the type is `Clone`.

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::query::QueryError;

/// A failed list fetch, as seen by views.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// No usable credentials; nothing is fetched until they exist.
    #[error("Credentials unavailable: {0}")]
    CredentialsUnavailable(String),

    /// Network failure (connection, DNS, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with an error object carrying a `code`.
    #[error("Backend error {code}: {}", message.as_deref().unwrap_or("no message"))]
    Backend {
        code: String,
        message: Option<String>,
        status: Option<u16>,
    },

    /// The body was not JSON, or a list element was not a record with an id.
    #[error("Response decode error: {0}")]
    Decode(String),
}

impl ListError {
    /// The backend error code, if this came from an error payload.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<CredentialError> for ListError {
    fn from(err: CredentialError) -> Self {
        Self::CredentialsUnavailable(err.to_string())
    }
}

impl From<QueryError> for ListError {
    fn from(err: QueryError) -> Self {
        // The only way to build a bad URL is a base URL that cannot carry a path.
        Self::CredentialsUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = ListError::Backend {
            code: "rest_forbidden".to_string(),
            message: Some("Sorry, you are not allowed to do that.".to_string()),
            status: Some(401),
        };
        assert_eq!(
            err.to_string(),
            "Backend error rest_forbidden: Sorry, you are not allowed to do that."
        );
        assert_eq!(err.code(), Some("rest_forbidden"));
    }

    #[test]
    fn test_backend_error_without_message() {
        let err = ListError::Backend {
            code: "oops".to_string(),
            message: None,
            status: None,
        };
        assert_eq!(err.to_string(), "Backend error oops: no message");
    }

    #[test]
    fn test_credential_errors_convert() {
        let err = ListError::from(CredentialError::NotFound("nothing stored".to_string()));
        assert!(matches!(err, ListError::CredentialsUnavailable(_)));
        assert_eq!(err.code(), None);
    }
}
