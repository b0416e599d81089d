//! Storekeep client library.
//!
//! Lists, filters, searches and paginates remote catalog records (products,
//! orders, reviews) from a Dokan / `WooCommerce` REST backend using stored
//! basic-auth credentials.
//!
//! # Architecture
//!
//! - [`credentials`] - Read-only credential sources (JSON blob, environment, in-memory)
//! - [`query`] - Pure request URL builder for list queries
//! - [`auth_header`] - `Authorization: Basic` header codec
//! - [`transport`] - Network boundary; classifies payloads into a tagged outcome
//! - [`controller`] - The paginated list state machine views render against
//! - [`search_input`] - Typed text and barcode scans feeding the same search intent
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use storekeep_client::{
//!     ClientConfig, HttpTransport, JsonFileCredentialSource, ListController, ListOptions,
//! };
//! use storekeep_core::Resource;
//!
//! let config = ClientConfig::from_env()?;
//! let transport = HttpTransport::new(&config)?;
//! let controller = ListController::new(transport, Resource::Products, ListOptions::from(&config));
//! controller
//!     .mount(&JsonFileCredentialSource::new("credentials.json"))
//!     .await;
//! controller.search("widget").await;
//! let snapshot = controller.snapshot();
//! # let _ = snapshot;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth_header;
pub mod config;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod query;
pub mod search_input;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use controller::{ListController, ListOptions, ListSnapshot, ListStatus};
pub use credentials::{
    CredentialError, CredentialSource, Credentials, EnvCredentialSource,
    JsonFileCredentialSource, StaticCredentialSource,
};
pub use error::ListError;
pub use search_input::{ScanSession, SearchBar, SearchSink};
pub use transport::{CatalogTransport, FetchOutcome, HttpTransport, PageRequest};
