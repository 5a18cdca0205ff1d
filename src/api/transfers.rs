//! Transfers service.

use std::sync::Arc;

use crate::client::{idempotency_headers, ClientInner};
use crate::models::transfer::CancelRequest;
use crate::models::{
    Account, NewTransfer, Resource, ResourceKind, Transfer, TransferFailure, TransferTransition,
};
use crate::Result;

/// Service for transfer operations.
///
/// # Example
///
/// ```no_run
/// use dwolla_rs::models::{Amount, NewTransfer, TransferTransition};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: dwolla_rs::DwollaClient) -> dwolla_rs::Result<()> {
/// let account = client.accounts().retrieve().await?;
/// let request = NewTransfer::builder()
///     .source("https://api-sandbox.dwolla.com/funding-sources/5cfcdc41-10f6-4a45-b11d-7ac89893d985")
///     .destination("https://api-sandbox.dwolla.com/funding-sources/AB443D36-3757-44C1-A1B4-29727FB3111C")
///     .amount(Amount::usd(dec!(225.00)))
///     .idempotency_key("19051a62-3403-11e6-ac61-9e71128cae77")
///     .build()?;
///
/// let location = client.transfers().create(&account, &request).await?;
/// let transfer = client.transfers().get(&location).await?;
///
/// if transfer.check(TransferTransition::Cancel).is_ok() {
///     client.transfers().cancel(&transfer).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct TransfersService {
    inner: Arc<ClientInner>,
}

impl TransfersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Initiate a transfer from the account's `send` link.
    ///
    /// The request's idempotency key, if set, is sent as the
    /// `Idempotency-Key` header. Returns the URL of the new transfer.
    pub async fn create(&self, account: &Account, transfer: &NewTransfer) -> Result<String> {
        let href = account.resolve("send")?;
        let headers = idempotency_headers(transfer.idempotency_key())?;
        self.inner
            .create(href, transfer, ResourceKind::Transfer, headers)
            .await
    }

    /// Get a transfer by URL.
    pub async fn get(&self, href: &str) -> Result<Transfer> {
        self.inner.get(href, ResourceKind::Transfer).await
    }

    /// List the facilitator fees charged on a transfer.
    ///
    /// Each fee is itself a transfer.
    pub async fn fees(&self, transfer: &Transfer) -> Result<Vec<Transfer>> {
        let href = transfer.resolve("fees")?;
        self.inner
            .list(href, "fees", ResourceKind::Transfer)
            .await
    }

    /// Get the ACH return details of a failed transfer.
    pub async fn failure(&self, transfer: &Transfer) -> Result<TransferFailure> {
        let href = transfer.resolve("failure")?;
        self.inner.get(href, ResourceKind::Transfer).await
    }

    /// Cancel a pending transfer.
    pub async fn cancel(&self, transfer: &Transfer) -> Result<Transfer> {
        transfer.check(TransferTransition::Cancel)?;
        let href = transfer.resolve("cancel")?;
        self.inner
            .update(href, &CancelRequest::new(), ResourceKind::Transfer)
            .await
    }
}
