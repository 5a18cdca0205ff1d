//! Identity documents uploaded for customer verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{DocumentType, ResourceKind};
use super::lifecycle::{DocumentStatus, DocumentVerificationStatus};
use super::links::{LinkMap, Resource};
use super::primitives::DocumentId;
use crate::{Error, Result};

/// Largest file the API accepts for a document upload.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// A document attached to a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Hypermedia links
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Document identifier
    pub id: DocumentId,
    /// Review status
    pub status: DocumentStatus,
    /// Kind of document
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    /// When the document was uploaded
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    /// Review outcome, once reviewed
    #[serde(default)]
    pub document_verification_status: Option<DocumentVerificationStatus>,
    /// Why the document was rejected
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl Document {
    /// Returns `true` once the document was reviewed and accepted.
    pub fn is_accepted(&self) -> bool {
        self.status == DocumentStatus::Reviewed
            && self.document_verification_status == Some(DocumentVerificationStatus::Accepted)
    }
}

impl Resource for Document {
    const KIND: ResourceKind = ResourceKind::Document;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// A file to upload as a verification document.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Kind of document
    pub document_type: DocumentType,
    /// File name sent with the upload
    pub file_name: String,
    /// MIME type of the file, e.g. `image/jpeg`
    pub mime_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    /// Describe a file to upload.
    pub fn new(
        document_type: DocumentType,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            document_type,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Check the file before uploading.
    pub fn validate(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(Error::InvalidInput("document file is empty".to_string()));
        }
        if self.bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(Error::InvalidInput(format!(
                "document file is {} bytes, the limit is {MAX_DOCUMENT_BYTES}",
                self.bytes.len()
            )));
        }
        match self.mime_type.as_str() {
            "image/jpeg" | "image/png" | "application/pdf" => Ok(()),
            other => Err(Error::InvalidInput(format!(
                "unsupported document type `{other}`"
            ))),
        }
    }
}
