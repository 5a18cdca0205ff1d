//! Funding source models and the micro-deposit protocol bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::enums::{BankAccountType, Channel, FundingSourceType, ResourceKind};
use super::lifecycle::{
    FundingSourceStatus, FundingSourceTransition, Lifecycle, MicroDepositStatus,
};
use super::links::{Link, LinkMap, Resource};
use super::primitives::FundingSourceId;
use crate::{Error, Result};

/// A bank account or balance that can send or receive funds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSource {
    /// Hypermedia links (`self`, `customer`, `initiate-micro-deposits`, ...)
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Funding source identifier
    pub id: FundingSourceId,
    /// Verification status
    pub status: FundingSourceStatus,
    /// Source kind
    #[serde(rename = "type")]
    pub source_type: FundingSourceType,
    /// Bank account kind, for bank sources
    #[serde(default)]
    pub bank_account_type: Option<BankAccountType>,
    /// Nickname
    pub name: String,
    /// Name of the holding bank
    #[serde(default)]
    pub bank_name: Option<String>,
    /// When the funding source was added
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    /// Set once the funding source has been removed
    #[serde(default)]
    pub removed: bool,
    /// Payment rails available
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Stable fingerprint of the underlying bank account
    #[serde(default)]
    pub fingerprint: Option<String>,
}

impl FundingSource {
    /// Returns `true` if ownership has been verified.
    pub fn is_verified(&self) -> bool {
        self.status == FundingSourceStatus::Verified
    }

    /// Validate a micro-deposit step against the current status.
    ///
    /// Removed funding sources accept no transitions at all.
    pub fn check(&self, transition: FundingSourceTransition) -> Result<FundingSourceStatus> {
        if self.removed {
            return Err(Error::InvalidTransition {
                resource: ResourceKind::FundingSource,
                from: "removed".to_string(),
                requested: transition.to_string(),
            });
        }
        self.status.check(transition)
    }

    /// Reject operations on a removed funding source.
    pub(crate) fn ensure_active(&self, operation: &str) -> Result<()> {
        if self.removed {
            Err(Error::InvalidTransition {
                resource: ResourceKind::FundingSource,
                from: "removed".to_string(),
                requested: operation.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl Resource for FundingSource {
    const KIND: ResourceKind = ResourceKind::FundingSource;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// Body for attaching a bank account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFundingSource {
    /// ABA routing number
    pub routing_number: String,
    /// Account number
    pub account_number: String,
    /// Bank account kind
    pub bank_account_type: BankAccountType,
    /// Nickname
    pub name: String,
    /// Optional `on-demand-authorization` link
    #[serde(rename = "_links", skip_serializing_if = "LinkMap::is_empty")]
    pub links: LinkMap,
}

impl NewFundingSource {
    /// Describe a bank account to attach.
    pub fn new(
        routing_number: impl Into<String>,
        account_number: impl Into<String>,
        bank_account_type: BankAccountType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            routing_number: routing_number.into(),
            account_number: account_number.into(),
            bank_account_type,
            name: name.into(),
            links: LinkMap::new(),
        }
    }

    /// Attach an on-demand authorization so the source can be debited for
    /// variable amounts later.
    pub fn with_on_demand_authorization(mut self, href: impl Into<String>) -> Self {
        self.links.insert("on-demand-authorization", Link::new(href));
        self
    }

    /// Check the numbers before sending.
    pub fn validate(&self) -> Result<()> {
        if self.routing_number.len() != 9 || !self.routing_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::InvalidInput(
                "routing_number must be exactly 9 digits".to_string(),
            ));
        }
        if self.account_number.is_empty()
            || self.account_number.len() > 17
            || !self.account_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::InvalidInput(
                "account_number must be 1 to 17 digits".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("name is required".to_string()));
        }
        Ok(())
    }
}

/// Body for renaming a funding source.
#[derive(Debug, Clone, Serialize)]
pub struct FundingSourceUpdate {
    /// New nickname
    pub name: String,
}

/// Body that removes a funding source.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Removal {
    pub removed: bool,
}

/// Balance of a `balance` funding source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Hypermedia links
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Current balance
    pub balance: Amount,
    /// When the balance was last updated
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Resource for Balance {
    const KIND: ResourceKind = ResourceKind::Balance;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// Details of the micro-deposits sent to a funding source.
#[derive(Debug, Clone, Deserialize)]
pub struct MicroDeposits {
    /// Hypermedia links
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// When the deposits were initiated
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Delivery status
    pub status: MicroDepositStatus,
    /// Failure details, when delivery failed
    #[serde(default)]
    pub failure: Option<MicroDepositFailure>,
}

impl Resource for MicroDeposits {
    const KIND: ResourceKind = ResourceKind::MicroDeposits;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// ACH return details for failed micro-deposits.
#[derive(Debug, Clone, Deserialize)]
pub struct MicroDepositFailure {
    /// ACH return code, e.g. `R03`
    pub code: String,
    /// Return description
    pub description: String,
}

/// The two observed micro-deposit amounts.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct VerifyMicroDepositsRequest {
    pub amount1: Amount,
    pub amount2: Amount,
}

impl VerifyMicroDepositsRequest {
    pub fn new(amount1: Amount, amount2: Amount) -> Result<Self> {
        amount1.ensure_positive("amount1")?;
        amount2.ensure_positive("amount2")?;
        Ok(Self { amount1, amount2 })
    }
}

/// Successful outcome of submitting micro-deposit amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroDepositVerification {
    /// The amounts matched; the funding source is now verified
    Verified,
    /// The deposits have not settled yet; resubmit later
    NotYetSettled,
}

impl MicroDepositVerification {
    /// Returns `true` if the funding source was verified.
    pub fn is_verified(&self) -> bool {
        matches!(self, MicroDepositVerification::Verified)
    }
}

/// Consent text for debiting a bank account for variable amounts.
///
/// Show `body_text` and `button_text` to the user, then pass the `self`
/// link to [`NewFundingSource::with_on_demand_authorization`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandAuthorization {
    /// Hypermedia links
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Authorization text
    pub body_text: String,
    /// Label for the accept button
    pub button_text: String,
}

impl Resource for OnDemandAuthorization {
    const KIND: ResourceKind = ResourceKind::OnDemandAuthorization;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}
