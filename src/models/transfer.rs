//! Transfer models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::enums::ResourceKind;
use super::lifecycle::{Lifecycle, TransferStatus, TransferTransition};
use super::links::{Link, LinkMap, Resource};
use super::primitives::TransferId;
use crate::{Error, Result};

/// Application-supplied key/value pairs attached to a transfer or payout.
///
/// Values are arbitrary JSON, so numbers and booleans round-trip as sent.
pub type Metadata = HashMap<String, serde_json::Value>;

/// A movement of funds between two funding sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Hypermedia links (`self`, `source`, `destination`, `cancel`, `fees`, ...)
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Transfer identifier
    pub id: TransferId,
    /// Current status
    pub status: TransferStatus,
    /// Amount moved
    pub amount: Amount,
    /// When the transfer was created
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    /// Application-supplied metadata
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Application-assigned correlation identifier
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// Expected clearing dates
    #[serde(default)]
    pub clearing: Option<Clearing>,
}

impl Transfer {
    /// Validate `transition` against the transfer's current status.
    pub fn check(&self, transition: TransferTransition) -> Result<TransferStatus> {
        self.status.check(transition)
    }

    /// Returns `true` if the server advertises fees for this transfer.
    pub fn has_fees(&self) -> bool {
        self.links.contains("fees")
    }

    /// Returns `true` if failure details are available.
    pub fn has_failure(&self) -> bool {
        self.links.contains("failure")
    }
}

impl Resource for Transfer {
    const KIND: ResourceKind = ResourceKind::Transfer;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// Clearing speed for either side of a transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clearing {
    /// Debit side clearing, e.g. `standard`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Credit side clearing, e.g. `next-available`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// A facilitator fee charged on a transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fee {
    /// Fee destination link
    #[serde(rename = "_links")]
    pub links: LinkMap,
    /// Fee amount
    pub amount: Amount,
}

impl Fee {
    /// Charge `amount` to the account or customer at `charge_to`.
    pub fn new(charge_to: impl Into<String>, amount: Amount) -> Self {
        Self {
            links: [("charge-to", Link::new(charge_to))].into_iter().collect(),
            amount,
        }
    }
}

/// Body of a transfer's `failure` relation.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferFailure {
    /// Hypermedia links
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// ACH return code, e.g. `R01`
    pub code: String,
    /// Return description
    pub description: String,
    /// Free-form explanation
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Request body for a new transfer.
///
/// # Example
///
/// ```
/// use dwolla_rs::models::{Amount, NewTransfer};
/// use rust_decimal_macros::dec;
///
/// let transfer = NewTransfer::builder()
///     .source("https://api-sandbox.dwolla.com/funding-sources/a")
///     .destination("https://api-sandbox.dwolla.com/funding-sources/b")
///     .amount(Amount::usd(dec!(225.00)))
///     .metadata("invoice", "1234")
///     .idempotency_key("19051a62-3403-11e6-ac61-9e71128cae77")
///     .build()
///     .unwrap();
///
/// assert_eq!(transfer.idempotency_key(), Some("19051a62-3403-11e6-ac61-9e71128cae77"));
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    #[serde(rename = "_links")]
    links: LinkMap,
    amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fees: Vec<Fee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clearing: Option<Clearing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip)]
    idempotency_key: Option<String>,
}

impl NewTransfer {
    /// Start building a transfer.
    pub fn builder() -> NewTransferBuilder {
        NewTransferBuilder::default()
    }

    /// Key sent in the `Idempotency-Key` header, if any.
    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    /// Amount to move.
    pub fn amount(&self) -> &Amount {
        &self.amount
    }
}

/// Builder for [`NewTransfer`].
#[derive(Debug, Default, Clone)]
pub struct NewTransferBuilder {
    source: Option<String>,
    destination: Option<String>,
    amount: Option<Amount>,
    metadata: Metadata,
    fees: Vec<Fee>,
    clearing: Option<Clearing>,
    correlation_id: Option<String>,
    idempotency_key: Option<String>,
}

impl NewTransferBuilder {
    /// Source funding source URL.
    pub fn source(mut self, href: impl Into<String>) -> Self {
        self.source = Some(href.into());
        self
    }

    /// Destination funding source or customer URL.
    pub fn destination(mut self, href: impl Into<String>) -> Self {
        self.destination = Some(href.into());
        self
    }

    /// Amount to move.
    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Add a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Add a facilitator fee.
    pub fn fee(mut self, fee: Fee) -> Self {
        self.fees.push(fee);
        self
    }

    /// Request a clearing speed.
    pub fn clearing(mut self, clearing: Clearing) -> Self {
        self.clearing = Some(clearing);
        self
    }

    /// Set a correlation identifier.
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Make the request safe to repeat.
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Build the transfer request.
    pub fn build(self) -> Result<NewTransfer> {
        let source = self
            .source
            .ok_or_else(|| Error::InvalidInput("source is required".to_string()))?;
        let destination = self
            .destination
            .ok_or_else(|| Error::InvalidInput("destination is required".to_string()))?;
        let amount = self
            .amount
            .ok_or_else(|| Error::InvalidInput("amount is required".to_string()))?;
        amount.ensure_positive("amount")?;

        if source == destination {
            return Err(Error::InvalidInput(
                "source and destination must differ".to_string(),
            ));
        }
        if self.metadata.len() > 10 {
            return Err(Error::InvalidInput(
                "at most 10 metadata entries are allowed".to_string(),
            ));
        }
        for fee in &self.fees {
            fee.amount.ensure_positive("fee")?;
        }

        Ok(NewTransfer {
            links: [("source", Link::new(source)), ("destination", Link::new(destination))]
                .into_iter()
                .collect(),
            amount,
            metadata: (!self.metadata.is_empty()).then_some(self.metadata),
            fees: self.fees,
            clearing: self.clearing,
            correlation_id: self.correlation_id,
            idempotency_key: self.idempotency_key,
        })
    }
}

/// Body that cancels a transfer.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CancelRequest {
    pub status: TransferStatus,
}

impl CancelRequest {
    pub fn new() -> Self {
        Self {
            status: TransferStatus::Cancelled,
        }
    }
}
