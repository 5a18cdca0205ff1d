//! Authentication for the Dwolla API.
//!
//! Dwolla applications authenticate with the OAuth2 client-credentials
//! grant: the client id and secret are exchanged at `{root}/token` for a
//! short-lived bearer token. [`TokenManager`] owns that exchange and the
//! resulting token.
//!
//! ```no_run
//! use dwolla_rs::{Credentials, DwollaClient, Environment};
//!
//! # async fn example() -> dwolla_rs::Result<()> {
//! let client = DwollaClient::connect(Credentials::new(
//!     "your-client-id",
//!     "your-client-secret",
//!     Environment::Sandbox,
//! ))
//! .await?;
//!
//! // After an `Error::InvalidToken`, force a fresh token and retry once.
//! client.invalidate_token().await;
//! # Ok(())
//! # }
//! ```

mod token;

pub use token::{TokenManager, DEFAULT_TOKEN_TTL_SECS};
