//! Stored backend credentials and the sources they are read from.
//!
//! Credentials are a read-only snapshot: a list controller loads them once
//! when it mounts and never refreshes them. Sources only expose a read
//! contract; writing credentials is the job of whatever stores them.

use std::future::Future;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::auth_header;

/// Environment variable holding the backend base URL.
pub const BASE_URL_VAR: &str = "STOREKEEP_BASE_URL";
/// Environment variable holding the basic-auth username.
pub const USERNAME_VAR: &str = "STOREKEEP_USERNAME";
/// Environment variable holding the basic-auth password.
pub const PASSWORD_VAR: &str = "STOREKEEP_PASSWORD";

/// Errors reading stored credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Nothing is stored.
    #[error("No stored credentials: {0}")]
    NotFound(String),

    /// Something is stored but it is not a credential record.
    #[error("Malformed credentials: {0}")]
    Malformed(String),

    /// The base URL is not an absolute http(s) URL that can carry a path.
    #[error("Invalid base URL {0}: {1}")]
    InvalidBaseUrl(String, String),

    /// Reading the backing store failed.
    #[error("Failed to read credentials: {0}")]
    Io(#[from] std::io::Error),
}

/// Backend base URL plus basic-auth username and password.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    base_url: Url,
    username: String,
    password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// On-disk / stored shape of the credential record.
#[derive(Deserialize)]
struct StoredCredentials {
    base_url: String,
    username: String,
    password: String,
}

impl Credentials {
    /// Validate and build credentials.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidBaseUrl` if the base URL is not an
    /// absolute http(s) URL that can carry a path.
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, CredentialError> {
        let invalid = |reason: &str| {
            CredentialError::InvalidBaseUrl(base_url.to_string(), reason.to_string())
        };
        let parsed = Url::parse(base_url.trim()).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path"));
        }

        Ok(Self {
            base_url: parsed,
            username: username.into(),
            password,
        })
    }

    /// Parse the stored JSON record `{"base_url", "username", "password"}`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Malformed` if the JSON does not have that
    /// shape, or `CredentialError::InvalidBaseUrl` for a bad base URL.
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        let stored: StoredCredentials =
            serde_json::from_str(json).map_err(|e| CredentialError::Malformed(e.to_string()))?;
        Self::new(
            &stored.base_url,
            stored.username,
            SecretString::from(stored.password),
        )
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The `Authorization` header value for these credentials.
    #[must_use]
    pub fn authorization(&self) -> SecretString {
        SecretString::from(auth_header::encode(
            &self.username,
            self.password.expose_secret(),
        ))
    }
}

/// Asynchronous, read-only access to stored credentials.
pub trait CredentialSource: Send + Sync {
    /// Read the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns error if nothing is stored or the stored value is malformed.
    fn load(&self) -> impl Future<Output = Result<Credentials, CredentialError>> + Send;
}

/// Reads the stored JSON credential record from a file.
#[derive(Debug, Clone)]
pub struct JsonFileCredentialSource {
    path: PathBuf,
}

impl JsonFileCredentialSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for JsonFileCredentialSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Credentials, CredentialError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CredentialError::NotFound(format!(
                    "{} does not exist",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let credentials = Credentials::from_json(&json)?;
        debug!(username = %credentials.username(), "Loaded credentials from file");
        Ok(credentials)
    }
}

/// Reads credentials from `STOREKEEP_BASE_URL`, `STOREKEEP_USERNAME` and
/// `STOREKEEP_PASSWORD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentialSource;

impl EnvCredentialSource {
    /// Build credentials from a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::NotFound` naming the first missing variable.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials, CredentialError> {
        let get = |key: &str| {
            lookup(key).ok_or_else(|| CredentialError::NotFound(format!("{key} is not set")))
        };
        let base_url = get(BASE_URL_VAR)?;
        let username = get(USERNAME_VAR)?;
        let password = SecretString::from(get(PASSWORD_VAR)?);
        Credentials::new(&base_url, username, password)
    }
}

impl CredentialSource for EnvCredentialSource {
    async fn load(&self) -> Result<Credentials, CredentialError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// In-memory credentials, or a source with nothing stored.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialSource {
    credentials: Option<Credentials>,
}

impl StaticCredentialSource {
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    /// A source with nothing stored.
    #[must_use]
    pub const fn empty() -> Self {
        Self { credentials: None }
    }
}

impl CredentialSource for StaticCredentialSource {
    async fn load(&self) -> Result<Credentials, CredentialError> {
        self.credentials
            .clone()
            .ok_or_else(|| CredentialError::NotFound("no credentials stored".to_string()))
    }
}
