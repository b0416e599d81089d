//! Network boundary for list fetches.
//!
//! The response shape is decided exactly once, here, and handed to the
//! controller as a [`FetchOutcome`]. Nothing downstream sniffs raw JSON.

use std::future::Future;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use storekeep_core::ResultItem;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ListError;

/// One page request: the built URL and the encoded `Authorization` value.
///
/// Implements `Debug` manually to redact the header value.
#[derive(Clone)]
pub struct PageRequest {
    pub url: Url,
    pub authorization: SecretString,
}

impl std::fmt::Debug for PageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRequest")
            .field("url", &self.url.as_str())
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}

/// Classified list response.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A list of records (possibly empty).
    Items(Vec<ResultItem>),
    /// An error object carrying a `code`.
    BackendFailure {
        code: String,
        message: Option<String>,
        status: Option<u16>,
    },
    /// Neither a list nor an error object.
    Unrecognized,
}

impl FetchOutcome {
    /// Classify a decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ListError::Decode` if the body is a list containing an element
    /// that is not a record with an `id`.
    pub fn from_json(body: Value) -> Result<Self, ListError> {
        match body {
            Value::Array(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(index, element)| {
                    ResultItem::from_value(element)
                        .map_err(|e| ListError::Decode(format!("item {index}: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Items),
            Value::Object(object) => {
                // An empty or zero code does not mark an error.
                let code = match object.get("code") {
                    Some(Value::String(code)) if !code.is_empty() => code.clone(),
                    Some(Value::Number(code)) if code.as_u64() != Some(0) => code.to_string(),
                    _ => return Ok(Self::Unrecognized),
                };
                let message = object
                    .get("message")
                    .and_then(Value::as_str)
                    .map(String::from);
                let status = object
                    .get("data")
                    .and_then(|data| data.get("status"))
                    .and_then(Value::as_u64)
                    .and_then(|status| u16::try_from(status).ok());
                Ok(Self::BackendFailure {
                    code,
                    message,
                    status,
                })
            }
            _ => Ok(Self::Unrecognized),
        }
    }
}

/// Issues authenticated GET requests for list pages.
pub trait CatalogTransport: Send + Sync {
    /// Fetch and classify one page.
    ///
    /// # Errors
    ///
    /// Returns `ListError::Transport` for network failures and
    /// `ListError::Decode` for bodies that are not usable JSON.
    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<FetchOutcome, ListError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport from client configuration.
    ///
    /// Without a configured timeout the transport's default applies.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("storekeep/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl CatalogTransport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn fetch_page(&self, request: &PageRequest) -> Result<FetchOutcome, ListError> {
        let mut authorization = HeaderValue::from_str(request.authorization.expose_secret())
            .map_err(|e| ListError::CredentialsUnavailable(format!("invalid header value: {e}")))?;
        authorization.set_sensitive(true);

        let response = self
            .client
            .get(request.url.clone())
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ListError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ListError::Transport(e.to_string()))?;

        let json: Value = serde_json::from_slice(&body)
            .map_err(|e| ListError::Decode(format!("HTTP {status}: {e}")))?;

        let outcome = match FetchOutcome::from_json(json)? {
            FetchOutcome::BackendFailure {
                code,
                message,
                status: None,
            } if !status.is_success() => FetchOutcome::BackendFailure {
                code,
                message,
                status: Some(status.as_u16()),
            },
            outcome => outcome,
        };

        match &outcome {
            FetchOutcome::Items(items) => debug!(%status, count = items.len(), "Fetched page"),
            FetchOutcome::BackendFailure { code, .. } => {
                warn!(%status, code = %code, "Backend returned an error payload");
            }
            FetchOutcome::Unrecognized => warn!(%status, "Unrecognized list payload"),
        }

        Ok(outcome)
    }
}
