//! Mass payments service.

use std::sync::Arc;

use crate::client::{idempotency_headers, ClientInner, PaginatedStream};
use crate::models::{
    Account, MassPayment, MassPaymentItem, NewMassPayment, Resource, ResourceKind,
};
use crate::Result;

/// Service for mass payment operations.
pub struct MassPaymentsService {
    inner: Arc<ClientInner>,
}

impl MassPaymentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a mass payment through the account's `mass-payments` link.
    ///
    /// Returns the URL of the new mass payment.
    pub async fn create(&self, account: &Account, payment: &NewMassPayment) -> Result<String> {
        payment.validate()?;
        let href = account.resolve("mass-payments")?;
        let headers = idempotency_headers(payment.idempotency_key())?;
        self.inner
            .create(href, payment, ResourceKind::MassPayment, headers)
            .await
    }

    /// Get a mass payment by URL.
    pub async fn get(&self, href: &str) -> Result<MassPayment> {
        self.inner.get(href, ResourceKind::MassPayment).await
    }

    /// List the first page of a mass payment's items.
    pub async fn items(&self, payment: &MassPayment) -> Result<Vec<MassPaymentItem>> {
        let href = payment.resolve("items")?;
        self.inner
            .list(href, "items", ResourceKind::MassPaymentItem)
            .await
    }

    /// Stream every item of a mass payment, page by page.
    pub fn items_stream(&self, payment: &MassPayment) -> Result<PaginatedStream<MassPaymentItem>> {
        let href = payment.resolve("items")?;
        Ok(PaginatedStream::follow(
            self.inner.clone(),
            href,
            "items",
            ResourceKind::MassPaymentItem,
        ))
    }
}
