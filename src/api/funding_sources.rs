//! Funding sources service, including micro-deposit verification.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::{read_created, reject, ClientInner, RequestBody};
use crate::models::funding::{Removal, VerifyMicroDepositsRequest};
use crate::models::{
    Amount, Balance, FundingSource, FundingSourceTransition, FundingSourceUpdate,
    MicroDepositVerification, MicroDeposits, Resource, ResourceKind,
};
use crate::{Error, Result};

/// Service for funding source operations.
///
/// Verifying a bank funding source takes two steps. First
/// [`initiate_micro_deposits`](Self::initiate_micro_deposits) asks the
/// server to send two small deposits. Once they settle, the account owner
/// reports the amounts through
/// [`verify_micro_deposits`](Self::verify_micro_deposits).
///
/// # Example
///
/// ```no_run
/// use dwolla_rs::models::{Amount, MicroDepositVerification};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: dwolla_rs::DwollaClient, href: &str) -> dwolla_rs::Result<()> {
/// let source = client.funding_sources().get(href).await?;
/// client.funding_sources().initiate_micro_deposits(&source).await?;
///
/// // ... one to two business days later ...
/// let source = client.funding_sources().get(href).await?;
/// match client
///     .funding_sources()
///     .verify_micro_deposits(&source, Amount::usd(dec!(0.03)), Amount::usd(dec!(0.09)))
///     .await?
/// {
///     MicroDepositVerification::Verified => println!("verified"),
///     MicroDepositVerification::NotYetSettled => println!("try again later"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct FundingSourcesService {
    inner: Arc<ClientInner>,
}

impl FundingSourcesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a funding source by URL.
    pub async fn get(&self, href: &str) -> Result<FundingSource> {
        self.inner.get(href, ResourceKind::FundingSource).await
    }

    /// Rename a funding source.
    pub async fn update(
        &self,
        source: &FundingSource,
        update: &FundingSourceUpdate,
    ) -> Result<FundingSource> {
        source.ensure_active("update")?;
        if update.name.trim().is_empty() {
            return Err(Error::InvalidInput("name is required".to_string()));
        }
        let href = source.resolve("self")?;
        self.inner
            .update(href, update, ResourceKind::FundingSource)
            .await
    }

    /// Remove a funding source.
    ///
    /// Removal is a soft delete: the server keeps the funding source and
    /// sets its `removed` flag.
    pub async fn remove(&self, source: &FundingSource) -> Result<FundingSource> {
        source.ensure_active("remove")?;
        let href = source.resolve("self")?;
        self.inner
            .update(href, &Removal { removed: true }, ResourceKind::FundingSource)
            .await
    }

    /// Get the balance of a `balance` funding source.
    pub async fn balance(&self, source: &FundingSource) -> Result<Balance> {
        source.ensure_active("balance")?;
        let href = source.resolve("balance")?;
        self.inner.get(href, ResourceKind::Balance).await
    }

    /// Ask the server to send two micro-deposits to the bank account.
    ///
    /// Returns the URL of the micro-deposits resource.
    pub async fn initiate_micro_deposits(&self, source: &FundingSource) -> Result<String> {
        source.check(FundingSourceTransition::InitiateMicroDeposits)?;
        let href = source.resolve("initiate-micro-deposits")?;
        let response = self
            .inner
            .send(Method::POST, href, RequestBody::Empty, HeaderMap::new())
            .await?;
        read_created(response, ResourceKind::MicroDeposits).await
    }

    /// Get the status of the micro-deposits sent to a funding source.
    pub async fn micro_deposits(&self, source: &FundingSource) -> Result<MicroDeposits> {
        let href = source.resolve("micro-deposits")?;
        self.inner.get(href, ResourceKind::MicroDeposits).await
    }

    /// Report the two micro-deposit amounts.
    ///
    /// # Returns
    ///
    /// - [`MicroDepositVerification::Verified`] on 200
    /// - [`MicroDepositVerification::NotYetSettled`] on 202; the deposits
    ///   have not settled and the amounts can be submitted again later
    ///
    /// # Errors
    ///
    /// - [`Error::ValidationOrDuplicate`] (400) if the amounts do not match
    /// - [`Error::NotAuthorized`] (403) once the attempt limit is exceeded
    /// - [`Error::ResourceNotFound`] (404) if micro-deposits were never initiated
    pub async fn verify_micro_deposits(
        &self,
        source: &FundingSource,
        amount1: Amount,
        amount2: Amount,
    ) -> Result<MicroDepositVerification> {
        source.check(FundingSourceTransition::VerifyMicroDeposits)?;
        let body = VerifyMicroDepositsRequest::new(amount1, amount2)?;
        let href = source.resolve("verify-micro-deposits")?;

        let response = self
            .inner
            .send(Method::POST, href, RequestBody::json(&body)?, HeaderMap::new())
            .await?;

        let outcome = match response.status() {
            StatusCode::OK => MicroDepositVerification::Verified,
            StatusCode::ACCEPTED => MicroDepositVerification::NotYetSettled,
            _ => return Err(reject(response, StatusCode::OK, ResourceKind::MicroDeposits).await),
        };
        debug!(funding_source = %source.id, ?outcome, "micro-deposits submitted");
        Ok(outcome)
    }
}
