//! Customers service for customer lifecycle, documents and funding sources.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use tracing::debug;
use url::Url;

use crate::client::{read_created, read_json, ClientInner, PaginatedStream, RequestBody};
use crate::models::customer::StatusChange;
use crate::models::{
    ClientToken, Customer, CustomerId, CustomerTransition, CustomerUpdate, Document,
    DocumentUpload, FundingSource, NewCustomer, NewFundingSource, Resource, ResourceKind,
    Transfer, VerifiedCustomer,
};
use crate::{Error, Result};

/// Service for customer operations.
///
/// Status changes are checked against the customer's current status before
/// anything is sent, so e.g. suspending an unverified customer fails with
/// [`Error::InvalidTransition`] without a network call.
///
/// # Example
///
/// ```no_run
/// use dwolla_rs::models::NewCustomer;
///
/// # async fn example(client: dwolla_rs::DwollaClient) -> dwolla_rs::Result<()> {
/// let location = client
///     .customers()
///     .create(&NewCustomer::new("Jane", "Doe", "jane@example.com"))
///     .await?;
///
/// let customer = client.customers().get_by_url(&location).await?;
/// println!("{} is {}", customer.full_name(), customer.status);
/// # Ok(())
/// # }
/// ```
pub struct CustomersService {
    inner: Arc<ClientInner>,
}

impl CustomersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a customer.
    ///
    /// Returns the URL of the new customer.
    pub async fn create(&self, customer: &NewCustomer) -> Result<String> {
        customer.validate()?;
        let href = self.inner.root_relation("customers")?;
        self.inner
            .create(href, customer, ResourceKind::Customer, HeaderMap::new())
            .await
    }

    /// Create a customer and verify their identity in one request.
    ///
    /// Returns the URL of the new customer.
    pub async fn create_verified(&self, customer: &VerifiedCustomer) -> Result<String> {
        let href = self.inner.root_relation("customers")?;
        self.inner
            .create(href, customer, ResourceKind::Customer, HeaderMap::new())
            .await
    }

    /// List the first page of customers.
    pub async fn list(&self) -> Result<Vec<Customer>> {
        let href = self.inner.root_relation("customers")?;
        self.inner
            .list(href, "customers", ResourceKind::Customer)
            .await
    }

    /// Stream every customer, page by page.
    pub fn list_stream(&self) -> Result<PaginatedStream<Customer>> {
        let href = self.inner.root_relation("customers")?;
        Ok(PaginatedStream::follow(
            self.inner.clone(),
            href,
            "customers",
            ResourceKind::Customer,
        ))
    }

    /// Get a customer by id.
    pub async fn get(&self, id: &CustomerId) -> Result<Customer> {
        let collection = self.inner.root_relation("customers")?;
        let mut url = Url::parse(collection)?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("`{collection}` cannot take an id segment")))?
            .pop_if_empty()
            .push(id.as_str());
        self.inner.get(url.as_str(), ResourceKind::Customer).await
    }

    /// Get a customer by URL, e.g. one returned by [`create`](Self::create).
    pub async fn get_by_url(&self, href: &str) -> Result<Customer> {
        self.inner.get(href, ResourceKind::Customer).await
    }

    /// Update a customer's contact details.
    pub async fn update(&self, customer: &Customer, update: &CustomerUpdate) -> Result<Customer> {
        if update.is_empty() {
            return Err(Error::InvalidInput("customer update changes nothing".to_string()));
        }
        let href = customer.resolve("self")?;
        self.inner
            .update(href, update, ResourceKind::Customer)
            .await
    }

    /// Upgrade an unverified customer by supplying full identity details.
    pub async fn verify(&self, customer: &Customer, details: &VerifiedCustomer) -> Result<Customer> {
        customer.check(CustomerTransition::Verify)?;
        let href = customer.resolve("self")?;
        self.inner
            .update(href, details, ResourceKind::Customer)
            .await
    }

    /// Suspend a verified customer.
    pub async fn suspend(&self, customer: &Customer) -> Result<Customer> {
        self.change_status(customer, CustomerTransition::Suspend).await
    }

    /// Deactivate a suspended customer.
    pub async fn deactivate(&self, customer: &Customer) -> Result<Customer> {
        self.change_status(customer, CustomerTransition::Deactivate).await
    }

    /// Reactivate a suspended customer.
    pub async fn reactivate(&self, customer: &Customer) -> Result<Customer> {
        self.change_status(customer, CustomerTransition::Reactivate).await
    }

    async fn change_status(
        &self,
        customer: &Customer,
        transition: CustomerTransition,
    ) -> Result<Customer> {
        let target = customer.check(transition)?;
        let href = customer.resolve("self")?;
        debug!(customer = %customer.id, from = %customer.status, to = %target, "changing customer status");
        self.inner
            .update(href, &StatusChange { status: target }, ResourceKind::Customer)
            .await
    }

    /// Upload an identity document for a customer awaiting document verification.
    ///
    /// Returns the URL of the new document.
    pub async fn add_document(&self, customer: &Customer, upload: DocumentUpload) -> Result<String> {
        upload.validate()?;
        let href = customer.resolve("documents")?;

        let form = document_form(upload)?;

        let response = self
            .inner
            .send(Method::POST, href, RequestBody::Multipart(form), HeaderMap::new())
            .await?;
        read_created(response, ResourceKind::Document).await
    }

    /// List a customer's documents.
    pub async fn documents(&self, customer: &Customer) -> Result<Vec<Document>> {
        let href = customer.resolve("documents")?;
        self.inner
            .list(href, "documents", ResourceKind::Document)
            .await
    }

    /// Attach a bank account to a customer.
    ///
    /// Returns the URL of the new funding source.
    pub async fn create_funding_source(
        &self,
        customer: &Customer,
        source: &NewFundingSource,
    ) -> Result<String> {
        source.validate()?;
        let href = customer.resolve("funding-sources")?;
        self.inner
            .create(href, source, ResourceKind::FundingSource, HeaderMap::new())
            .await
    }

    /// List a customer's funding sources.
    pub async fn funding_sources(&self, customer: &Customer) -> Result<Vec<FundingSource>> {
        let href = customer.resolve("funding-sources")?;
        self.inner
            .list(href, "funding-sources", ResourceKind::FundingSource)
            .await
    }

    /// Get a single-use token for the funding source drop-in component.
    pub async fn funding_sources_token(&self, customer: &Customer) -> Result<ClientToken> {
        self.client_token(customer, "funding-sources-token").await
    }

    /// Get a single-use token for instant account verification.
    pub async fn iav_token(&self, customer: &Customer) -> Result<ClientToken> {
        self.client_token(customer, "iav-token").await
    }

    async fn client_token(&self, customer: &Customer, relation: &str) -> Result<ClientToken> {
        let href = customer.resolve(relation)?;
        let response = self
            .inner
            .send(Method::POST, href, RequestBody::Empty, HeaderMap::new())
            .await?;
        read_json(response, StatusCode::OK, ResourceKind::ClientToken).await
    }

    /// List the first page of a customer's transfers.
    pub async fn transfers(&self, customer: &Customer) -> Result<Vec<Transfer>> {
        let href = customer.resolve("transfers")?;
        self.inner
            .list(href, "transfers", ResourceKind::Transfer)
            .await
    }

    /// Stream every transfer of a customer, page by page.
    pub fn transfers_stream(&self, customer: &Customer) -> Result<PaginatedStream<Transfer>> {
        let href = customer.resolve("transfers")?;
        Ok(PaginatedStream::follow(
            self.inner.clone(),
            href,
            "transfers",
            ResourceKind::Transfer,
        ))
    }
}

/// Build the multipart body for a document upload.
fn document_form(upload: DocumentUpload) -> Result<Form> {
    let file = Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.mime_type)
        .map_err(|_| Error::InvalidInput(format!("invalid mime type `{}`", upload.mime_type)))?;
    Ok(Form::new()
        .text("documentType", upload.document_type.as_str())
        .part("file", file))
}
