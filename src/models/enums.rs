//! Enumeration types for the Dwolla API.
//!
//! Status enums with transition rules live in [`super::lifecycle`]; this
//! module holds the descriptive enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of resource an operation targets.
///
/// Carried by errors so a caller can tell *which* lookup returned 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// The API root document
    Root,
    /// The master account
    Account,
    /// A customer
    Customer,
    /// An identity-verification document
    Document,
    /// A funding source
    FundingSource,
    /// Micro-deposits attached to a funding source
    MicroDeposits,
    /// A funding source balance
    Balance,
    /// A transfer
    Transfer,
    /// A mass payment
    MassPayment,
    /// An item of a mass payment
    MassPaymentItem,
    /// A client token (funding-sources-token or iav-token)
    ClientToken,
    /// Consent to debit a bank account for variable amounts
    OnDemandAuthorization,
}

impl ResourceKind {
    /// Lower-case, hyphenated name matching the API's `resource-type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Root => "root",
            ResourceKind::Account => "account",
            ResourceKind::Customer => "customer",
            ResourceKind::Document => "document",
            ResourceKind::FundingSource => "funding-source",
            ResourceKind::MicroDeposits => "micro-deposits",
            ResourceKind::Balance => "balance",
            ResourceKind::Transfer => "transfer",
            ResourceKind::MassPayment => "mass-payment",
            ResourceKind::MassPaymentItem => "mass-payment-item",
            ResourceKind::ClientToken => "token",
            ResourceKind::OnDemandAuthorization => "on-demand-authorization",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification tier of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    /// Can send and receive with limits, no identity checks
    Unverified,
    /// Can only receive funds
    #[serde(rename = "receive-only")]
    ReceiveOnly,
    /// Identity-verified individual
    Personal,
    /// Identity-verified business
    Business,
}

/// Kind of bank account behind a funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    /// Checking account
    Checking,
    /// Savings account
    Savings,
    /// General ledger account
    #[serde(rename = "general-ledger")]
    GeneralLedger,
    /// Loan account
    Loan,
}

/// Kind of funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingSourceType {
    /// External bank account
    Bank,
    /// Dwolla balance
    Balance,
}

/// Type of identity document uploaded for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    /// Passport
    Passport,
    /// Driver's license
    License,
    /// State-issued ID card
    IdCard,
    /// Any other supporting document
    Other,
}

impl DocumentType {
    /// Value sent in the `documentType` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::License => "license",
            DocumentType::IdCard => "idCard",
            DocumentType::Other => "other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment rail a funding source can transact on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// Standard ACH
    Ach,
    /// Wire transfer
    Wire,
    /// Real-time payments
    RealTimePayments,
    /// A channel this client does not know about
    #[serde(other)]
    Unknown,
}
