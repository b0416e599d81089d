//! `Authorization: Basic` header codec.
//!
//! This is an encoding, not encryption: anyone holding the header value can
//! recover the username and password. Callers keep encoded values in a
//! [`secrecy::SecretString`] and mark the transport header as sensitive.

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

/// Scheme prefix of a basic-auth header value.
pub const BASIC_PREFIX: &str = "Basic ";

/// Errors decoding a header value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthHeaderError {
    #[error("header value does not use the Basic scheme")]
    MissingScheme,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
    #[error("decoded payload is not valid UTF-8")]
    InvalidUtf8,
}

/// Encode `username:password` as a basic-auth header value.
///
/// Uses the standard, padded Base64 alphabet (never the URL-safe variant).
#[must_use]
pub fn encode(username: &str, password: &str) -> String {
    format!("{BASIC_PREFIX}{}", STANDARD.encode(format!("{username}:{password}")))
}

/// Decode a basic-auth header value back to `username:password`.
///
/// The joined form is returned rather than a split pair: usernames may
/// themselves contain colons, so the split point is ambiguous.
///
/// # Errors
///
/// Returns error if the value lacks the `Basic ` prefix or the payload is not
/// valid Base64 encoded UTF-8.
pub fn decode(header_value: &str) -> Result<String, AuthHeaderError> {
    let payload = header_value
        .strip_prefix(BASIC_PREFIX)
        .ok_or(AuthHeaderError::MissingScheme)?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AuthHeaderError::InvalidBase64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| AuthHeaderError::InvalidUtf8)
}
