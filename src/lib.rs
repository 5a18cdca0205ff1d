//! # dwolla-rs
//!
//! An async Rust client for the Dwolla payments API.
//!
//! The API is hypermedia-driven: every response carries a `_links` map, and
//! this client follows those links instead of building endpoint paths. A
//! client starts from the root document fetched at construction and reaches
//! everything else from there.
//!
//! ## Features
//!
//! - **Authentication**: client-credentials tokens, cached and refreshed on demand
//! - **Customers**: create, verify, suspend, deactivate, upload documents
//! - **Funding Sources**: attach bank accounts and verify them with micro-deposits
//! - **Transfers**: send, inspect fees and failures, cancel while pending
//! - **Mass Payments**: batch payouts from one funding source
//! - **Typed Lifecycles**: invalid status changes fail locally before any request
//! - **Async-first**: Built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dwolla_rs::{Credentials, DwollaClient, Environment};
//!
//! #[tokio::main]
//! async fn main() -> dwolla_rs::Result<()> {
//!     let client = DwollaClient::connect(Credentials::new(
//!         "client-id",
//!         "client-secret",
//!         Environment::Sandbox,
//!     ))
//!     .await?;
//!
//!     let account = client.accounts().retrieve().await?;
//!     println!("Connected as {}", account.name);
//!
//!     for customer in client.customers().list().await? {
//!         println!("{}: {}", customer.full_name(), customer.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Recovering from a rejected token
//!
//! The client never retries on its own. When the server rejects the bearer
//! token, drop it and retry once:
//!
//! ```rust,no_run
//! # async fn example(client: dwolla_rs::DwollaClient) -> dwolla_rs::Result<()> {
//! let account = match client.accounts().retrieve().await {
//!     Err(e) if e.is_invalid_token() => {
//!         client.invalidate_token().await;
//!         client.accounts().retrieve().await?
//!     }
//!     other => other?,
//! };
//! # let _ = account;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, ErrorKind, Result};
pub use models::{
    AccountId, CustomerId, DocumentId, Environment, FundingSourceId, MassPaymentId, TransferId,
};
pub use client::{ClientConfig, Credentials, DwollaClient};

/// Prelude module for convenient imports.
///
/// ```rust
/// use dwolla_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::models::{
        // Primitives
        AccountId, CustomerId, DocumentId, Environment, FundingSourceId, MassPaymentId,
        TransferId,
        // Links and amounts
        Amount, Link, LinkMap, Resource,
        // Lifecycles
        CustomerStatus, CustomerTransition, FundingSourceStatus, FundingSourceTransition,
        Lifecycle, TransferStatus, TransferTransition,
        // Resources
        Account, Balance, Customer, Document, FundingSource, MassPayment, MassPaymentItem,
        MicroDepositVerification, OnDemandAuthorization, Transfer,
        // Request bodies
        CustomerUpdate, DocumentUpload, NewCustomer, NewFundingSource, NewMassPayment,
        NewMassPaymentItem, NewTransfer, VerifiedCustomerBuilder,
    };
    pub use crate::client::{ClientConfig, Credentials, DwollaClient};
}
