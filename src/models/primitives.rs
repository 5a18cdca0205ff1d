//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around the opaque resource
//! identifiers the API hands out, so a customer ID cannot be passed where a
//! transfer ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

resource_id!(
    /// Identifier of the master account.
    AccountId
);

resource_id!(
    /// Identifier of a customer.
    ///
    /// ```
    /// use dwolla_rs::CustomerId;
    ///
    /// let id = CustomerId::new("FC451A7A-AE30-4404-AB95-E3553FCD733F");
    /// assert_eq!(id.as_str(), "FC451A7A-AE30-4404-AB95-E3553FCD733F");
    /// ```
    CustomerId
);

resource_id!(
    /// Identifier of a funding source (bank account or balance).
    FundingSourceId
);

resource_id!(
    /// Identifier of a transfer.
    TransferId
);

resource_id!(
    /// Identifier of an identity-verification document.
    DocumentId
);

resource_id!(
    /// Identifier of a mass payment.
    MassPaymentId
);

/// Environment configuration for the Dwolla API.
///
/// Determines the root URL every other location is discovered from.
///
/// # Example
///
/// ```
/// use dwolla_rs::Environment;
///
/// let env: Environment = "production".parse().unwrap();
/// assert_eq!(env.api_base_url(), "https://api.dwolla.com");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Sandbox environment; no real money moves.
    #[default]
    Sandbox,
    /// Production environment.
    Production,
}

impl Environment {
    /// Get the root URL of the API.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://api-sandbox.dwolla.com",
            Environment::Production => "https://api.dwolla.com",
        }
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(crate::Error::Config(format!(
                "unknown environment `{other}`, expected `sandbox` or `production`"
            ))),
        }
    }
}
