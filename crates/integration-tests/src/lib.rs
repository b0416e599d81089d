//! Integration tests for Storekeep.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storekeep-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `list_controller` - Controller driven end to end over HTTP against a
//!   mock Dokan backend (`httpmock`)
//!
//! Shared fixtures live here so every test binary builds controllers the
//! same way.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;
use storekeep_client::{
    ClientConfig, CredentialError, Credentials, HttpTransport, ListController, ListOptions,
    StaticCredentialSource,
};
use storekeep_core::Resource;

/// Username used by [`credentials_for`].
pub const TEST_USERNAME: &str = "vendor";

/// Password used by [`credentials_for`].
pub const TEST_PASSWORD: &str = "s3cret";

/// `Authorization` header the backend should receive for the test account.
pub const TEST_AUTHORIZATION: &str = "Basic dmVuZG9yOnMzY3JldA==";

/// Credentials for the test account pointing at `base_url`.
///
/// # Errors
///
/// Returns error if `base_url` is not an absolute http(s) URL.
pub fn credentials_for(base_url: &str) -> Result<StaticCredentialSource, CredentialError> {
    let credentials = Credentials::new(
        base_url,
        TEST_USERNAME,
        SecretString::from(TEST_PASSWORD.to_string()),
    )?;
    Ok(StaticCredentialSource::new(credentials))
}

/// An unmounted controller using the real HTTP transport.
///
/// # Errors
///
/// Returns error if the HTTP client fails to build.
pub fn http_controller(
    resource: Resource,
    options: ListOptions,
) -> Result<ListController<HttpTransport>, reqwest::Error> {
    let transport = HttpTransport::new(&ClientConfig::default())?;
    Ok(ListController::new(transport, resource, options))
}
