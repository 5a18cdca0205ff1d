//! Mass payment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::enums::ResourceKind;
use super::lifecycle::MassPaymentStatus;
use super::links::{Link, LinkMap, Resource};
use super::primitives::MassPaymentId;
use super::transfer::Metadata;
use crate::{Error, Result};

/// Most items a single mass payment may carry.
pub const MAX_MASS_PAYMENT_ITEMS: usize = 5000;

/// A batch of payouts from one source funding source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassPayment {
    /// Hypermedia links (`self`, `source`, `items`, ...)
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Mass payment identifier
    pub id: MassPaymentId,
    /// Current status
    pub status: MassPaymentStatus,
    /// When the mass payment was created
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    /// Application-supplied metadata
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Application-assigned correlation identifier
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// Sum of all items, when reported
    #[serde(default)]
    pub total: Option<Amount>,
}

impl Resource for MassPayment {
    const KIND: ResourceKind = ResourceKind::MassPayment;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// One payout within a mass payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassPaymentItem {
    /// Hypermedia links (`self`, `destination`, `transfer`, ...)
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Item identifier
    pub id: String,
    /// Item status, e.g. `pending`, `success`, `failed`
    pub status: String,
    /// Payout amount
    pub amount: Amount,
    /// Application-supplied metadata
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl Resource for MassPaymentItem {
    const KIND: ResourceKind = ResourceKind::MassPaymentItem;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// Request body for a new mass payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMassPayment {
    #[serde(rename = "_links")]
    links: LinkMap,
    items: Vec<NewMassPaymentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<MassPaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip)]
    idempotency_key: Option<String>,
}

/// A payout to include in a [`NewMassPayment`].
#[derive(Debug, Clone, Serialize)]
pub struct NewMassPaymentItem {
    #[serde(rename = "_links")]
    links: LinkMap,
    amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
}

impl NewMassPaymentItem {
    /// Pay `amount` to the funding source or customer at `destination`.
    pub fn new(destination: impl Into<String>, amount: Amount) -> Self {
        Self {
            links: [("destination", Link::new(destination))].into_iter().collect(),
            amount,
            metadata: None,
        }
    }

    /// Attach metadata to the item.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }
}

impl NewMassPayment {
    /// Start a mass payment drawing from the funding source at `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            links: [("source", Link::new(source))].into_iter().collect(),
            items: Vec::new(),
            status: None,
            correlation_id: None,
            idempotency_key: None,
        }
    }

    /// Add a payout.
    pub fn item(mut self, item: NewMassPaymentItem) -> Self {
        self.items.push(item);
        self
    }

    /// Create the mass payment in the deferred state.
    pub fn deferred(mut self) -> Self {
        self.status = Some(MassPaymentStatus::Deferred);
        self
    }

    /// Set a correlation identifier.
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Make the request safe to repeat.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Key sent in the `Idempotency-Key` header, if any.
    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    /// Check the batch before sending.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::InvalidInput(
                "a mass payment needs at least one item".to_string(),
            ));
        }
        if self.items.len() > MAX_MASS_PAYMENT_ITEMS {
            return Err(Error::InvalidInput(format!(
                "a mass payment holds at most {MAX_MASS_PAYMENT_ITEMS} items, got {}",
                self.items.len()
            )));
        }
        for item in &self.items {
            item.amount.ensure_positive("item amount")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mass_payment_deserialize() {
        let payment: MassPayment = serde_json::from_str(
            r#"{
                "_links": {
                    "self": { "href": "https://api-sandbox.dwolla.com/mass-payments/eb467252-808c-4bc0-b86f-a5cd01454563" },
                    "items": { "href": "https://api-sandbox.dwolla.com/mass-payments/eb467252-808c-4bc0-b86f-a5cd01454563/items" }
                },
                "id": "eb467252-808c-4bc0-b86f-a5cd01454563",
                "status": "complete",
                "created": "2015-09-03T14:14:10.000Z",
                "metadata": { "UserJobId": "some ID" },
                "correlationId": "8a2cdc8d-629d-4a24-98ac-40b735229fe2"
            }"#,
        )
        .unwrap();

        assert_eq!(payment.status, MassPaymentStatus::Complete);
        assert!(payment.status.is_terminal());
        assert!(payment.resolve("items").is_ok());
    }

    #[test]
    fn test_new_mass_payment_body() {
        let request = NewMassPayment::new("https://x/funding-sources/src")
            .item(
                NewMassPaymentItem::new("https://x/funding-sources/a", Amount::usd(dec!(1.00)))
                    .with_metadata("payee", "a"),
            )
            .deferred()
            .with_idempotency_key("batch-7");

        assert!(request.validate().is_ok());
        assert_eq!(request.idempotency_key(), Some("batch-7"));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["status"], "deferred");
        assert_eq!(body["items"][0]["_links"]["destination"]["href"], "https://x/funding-sources/a");
        assert_eq!(body["items"][0]["metadata"]["payee"], "a");
        assert!(body.get("idempotencyKey").is_none());
    }

    #[test]
    fn test_empty_mass_payment_rejected() {
        assert!(NewMassPayment::new("https://x/funding-sources/src").validate().is_err());
    }
}
