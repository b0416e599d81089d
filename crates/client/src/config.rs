//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREKEEP_PAGE_SIZE` - Records per page, 1 to 100 (default: 20)
//! - `STOREKEEP_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: transport default)
//! - `STOREKEEP_SIMULATED_LATENCY_MS` - Delay before every fetch, for latency testing
//! - `STOREKEEP_OVERLAPPING_PAGES` - Let `load_more` overlap in-flight fetches (default: false)
//! - `STOREKEEP_CREDENTIALS_FILE` - Path to the stored JSON credential record
//!
//! Credentials themselves are read by a [`crate::CredentialSource`], not here.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storekeep client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Records requested per page
    pub page_size: u32,
    /// Per-request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
    /// Artificial delay before each fetch
    pub simulated_latency: Option<Duration>,
    /// Whether `load_more` may start while another fetch is in flight
    pub overlapping_pages: bool,
    /// Stored credential record location
    pub credentials_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: None,
            simulated_latency: None,
            overlapping_pages: false,
            credentials_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let page_size = match lookup("STOREKEEP_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };
        let request_timeout = lookup("STOREKEEP_REQUEST_TIMEOUT_SECS")
            .map(|raw| parse_u64("STOREKEEP_REQUEST_TIMEOUT_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs);
        let simulated_latency = lookup("STOREKEEP_SIMULATED_LATENCY_MS")
            .map(|raw| parse_u64("STOREKEEP_SIMULATED_LATENCY_MS", &raw))
            .transpose()?
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
        let overlapping_pages = lookup("STOREKEEP_OVERLAPPING_PAGES")
            .map(|raw| parse_bool("STOREKEEP_OVERLAPPING_PAGES", &raw))
            .transpose()?
            .unwrap_or(false);
        let credentials_file = lookup("STOREKEEP_CREDENTIALS_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            page_size,
            request_timeout,
            simulated_latency,
            overlapping_pages,
            credentials_file,
        })
    }

    /// The configured credential file, or an error naming the variable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no credential file is configured.
    pub fn require_credentials_file(&self) -> Result<&PathBuf, ConfigError> {
        self.credentials_file
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("STOREKEEP_CREDENTIALS_FILE".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("STOREKEEP_PAGE_SIZE".to_string(), reason);
    let size: u32 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(invalid(format!("must be between 1 and {MAX_PAGE_SIZE} (got {size})")));
    }
    Ok(size)
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), format!("{e}")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
