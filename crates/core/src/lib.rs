//! Storekeep Core - Shared catalog types.
//!
//! This crate provides the types shared by the Storekeep components:
//! - `client` - Paginated list controller and REST transport
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients, no async runtime. Anything that talks to the backend lives in
//! `storekeep-client`.
//!
//! # Modules
//!
//! - [`types`] - Resources, filter sets, search values, pages and result items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
