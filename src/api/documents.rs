//! Documents service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{Document, ResourceKind};
use crate::Result;

/// Service for identity documents.
///
/// Documents are uploaded through
/// [`CustomersService::add_document`](crate::api::CustomersService::add_document);
/// this service reads them back to follow their review.
pub struct DocumentsService {
    inner: Arc<ClientInner>,
}

impl DocumentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a document by URL.
    pub async fn get(&self, href: &str) -> Result<Document> {
        self.inner.get(href, ResourceKind::Document).await
    }
}
