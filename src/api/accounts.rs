//! Accounts service for master account operations.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::client::{read_json, ClientInner, PaginatedStream, RequestBody};
use crate::models::{
    Account, FundingSource, MassPayment, NewFundingSource, OnDemandAuthorization, Resource,
    ResourceKind, Transfer,
};
use crate::Result;

/// Service for the application's master account.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: dwolla_rs::DwollaClient) -> dwolla_rs::Result<()> {
/// let account = client.accounts().retrieve().await?;
/// println!("Account: {} ({})", account.name, account.id);
///
/// for source in client.accounts().funding_sources(&account).await? {
///     println!("  {} [{}]", source.name, source.status);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetch the master account advertised by the API root.
    pub async fn retrieve(&self) -> Result<Account> {
        let href = self.inner.root_relation("account")?;
        self.inner.get(href, ResourceKind::Account).await
    }

    /// List the account's funding sources.
    pub async fn funding_sources(&self, account: &Account) -> Result<Vec<FundingSource>> {
        let href = account.resolve("funding-sources")?;
        self.inner
            .list(href, "funding-sources", ResourceKind::FundingSource)
            .await
    }

    /// Attach a bank account to the master account.
    ///
    /// Returns the URL of the new funding source.
    pub async fn create_funding_source(
        &self,
        account: &Account,
        source: &NewFundingSource,
    ) -> Result<String> {
        source.validate()?;
        let href = account.resolve("funding-sources")?;
        self.inner
            .create(href, source, ResourceKind::FundingSource, HeaderMap::new())
            .await
    }

    /// Request consent text for debiting a bank account for variable amounts.
    ///
    /// Once the user accepts, attach the authorization's `self` link to the
    /// funding source with [`NewFundingSource::with_on_demand_authorization`].
    pub async fn create_on_demand_authorization(
        &self,
        account: &Account,
    ) -> Result<OnDemandAuthorization> {
        let href = account.resolve("on-demand-authorizations")?;
        let response = self
            .inner
            .send(Method::POST, href, RequestBody::Empty, HeaderMap::new())
            .await?;
        read_json(response, StatusCode::OK, ResourceKind::OnDemandAuthorization).await
    }

    /// List the first page of the account's transfers.
    pub async fn transfers(&self, account: &Account) -> Result<Vec<Transfer>> {
        let href = account.resolve("transfers")?;
        self.inner
            .list(href, "transfers", ResourceKind::Transfer)
            .await
    }

    /// Stream every transfer of the account, page by page.
    pub fn transfers_stream(&self, account: &Account) -> Result<PaginatedStream<Transfer>> {
        let href = account.resolve("transfers")?;
        Ok(PaginatedStream::follow(
            self.inner.clone(),
            href,
            "transfers",
            ResourceKind::Transfer,
        ))
    }

    /// List the account's mass payments.
    pub async fn mass_payments(&self, account: &Account) -> Result<Vec<MassPayment>> {
        let href = account.resolve("mass-payments")?;
        self.inner
            .list(href, "mass-payments", ResourceKind::MassPayment)
            .await
    }
}
