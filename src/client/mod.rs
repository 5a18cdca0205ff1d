//! HTTP client and service layer for the Dwolla API.
//!
//! This module provides the main entry point [`DwollaClient`] for
//! interacting with the Dwolla API.
//!
//! # Example
//!
//! ```no_run
//! use dwolla_rs::{ClientConfig, Credentials, DwollaClient, Environment};
//! use std::time::Duration;
//!
//! # async fn example() -> dwolla_rs::Result<()> {
//! let client = DwollaClient::connect_with_config(
//!     Credentials::new("client-id", "client-secret", Environment::Sandbox),
//!     ClientConfig::default().with_timeout(Duration::from_secs(10)),
//! )
//! .await?;
//!
//! let customers = client.customers().list().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;

pub use config::{ClientConfig, Credentials};
pub use http::{DwollaClient, HAL_JSON, IDEMPOTENCY_KEY};
pub use paginated::PaginatedStream;
pub(crate) use http::{
    idempotency_headers, read_created, read_json, reject, ClientInner, RequestBody,
};
