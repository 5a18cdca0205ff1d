//! Data models for the Dwolla API.
//!
//! Every resource the API returns is a strongly-typed struct carrying its
//! own `_links`. Models are organized by domain:
//!
//! - [`primitives`] - Identifier newtypes and the [`Environment`]
//! - [`enums`] - Descriptive enums such as account and document types
//! - [`lifecycle`] - Status enums and the transitions a client may request
//! - [`links`] - HAL link maps and collection pages
//! - [`amount`] - Currency amounts
//! - [`account`] - The master account
//! - [`customer`] - Customers and verification request bodies
//! - [`document`] - Identity documents
//! - [`funding`] - Funding sources and micro-deposits
//! - [`transfer`] - Transfers, fees, and failures
//! - [`mass_payment`] - Mass payments and their items

pub mod primitives;
pub mod enums;
pub mod lifecycle;
pub mod links;
pub mod amount;
pub mod account;
pub mod customer;
pub mod document;
pub mod funding;
pub mod transfer;
pub mod mass_payment;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use lifecycle::*;
pub use links::*;
pub use amount::*;
pub use account::*;
pub use customer::*;
pub use document::*;
pub use funding::*;
pub use transfer::*;
pub use mass_payment::*;
