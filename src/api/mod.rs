//! API service modules for Dwolla resources.
//!
//! Each service provides methods for one kind of resource. Services never
//! build endpoint paths: every URL comes from the root document or from a
//! resource the caller already holds.

mod accounts;
mod customers;
mod documents;
mod funding_sources;
mod mass_payments;
mod transfers;

pub use accounts::AccountsService;
pub use customers::CustomersService;
pub use documents::DocumentsService;
pub use funding_sources::FundingSourcesService;
pub use mass_payments::MassPaymentsService;
pub use transfers::TransfersService;
