//! Error types for the Dwolla API client.
//!
//! Every failure the client can produce is a variant of [`Error`]. Callers
//! that only need to branch on the category of a failure can use
//! [`Error::kind`], which returns a `Copy` tag.
//!
//! HTTP statuses are classified the same way for every resource by
//! [`map_status`]; [`Error::from_status`] builds the full error, carrying the
//! resource kind and the decoded API error body for diagnostics.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::models::ResourceKind;

/// A specialized `Result` type for Dwolla operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Dwolla API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The token endpoint could not be reached.
    #[error("token request failed: {0}")]
    AuthTransport(#[source] reqwest::Error),

    /// The token endpoint answered with a non-200 status.
    #[error("token request rejected: status={status}")]
    AuthRejected {
        /// HTTP status returned by the token endpoint
        status: u16,
        /// Decoded error body, if the endpoint sent one
        body: Option<ApiErrorBody>,
    },

    /// The token endpoint returned a payload that is not a token response.
    #[error("malformed token response: {0}")]
    AuthDecode(#[source] serde_json::Error),

    /// The link map does not advertise the requested relation.
    #[error("relation `{relation}` not found in link map")]
    RelationNotFound {
        /// Name of the missing relation
        relation: String,
    },

    /// Bad request body, or the resource already exists or is already linked (400).
    #[error("{resource}: validation failed or duplicate ({})", message_of(.body))]
    ValidationOrDuplicate {
        /// Resource the request targeted
        resource: ResourceKind,
        /// Decoded error body
        body: Option<ApiErrorBody>,
    },

    /// The bearer token was rejected (401).
    ///
    /// Call [`DwollaClient::invalidate_token`](crate::DwollaClient::invalidate_token)
    /// and retry the operation once.
    #[error("{resource}: access token rejected")]
    InvalidToken {
        /// Resource the request targeted
        resource: ResourceKind,
    },

    /// The application's grant does not allow this operation (403).
    #[error("{resource}: not authorized ({})", message_of(.body))]
    NotAuthorized {
        /// Resource the request targeted
        resource: ResourceKind,
        /// Decoded error body
        body: Option<ApiErrorBody>,
    },

    /// The resource does not exist (404).
    #[error("{resource}: not found")]
    ResourceNotFound {
        /// Resource the request targeted
        resource: ResourceKind,
        /// Decoded error body
        body: Option<ApiErrorBody>,
    },

    /// Any other non-success status.
    #[error("{resource}: API error status={status} ({})", message_of(.body))]
    UnclassifiedApi {
        /// HTTP status code
        status: u16,
        /// Resource the request targeted
        resource: ResourceKind,
        /// Decoded error body
        body: Option<ApiErrorBody>,
    },

    /// A success status other than the one the operation expects.
    #[error("{resource}: unexpected status {status}, expected {expected}")]
    UnexpectedStatus {
        /// Status actually returned
        status: u16,
        /// Status the operation expects
        expected: u16,
        /// Resource the request targeted
        resource: ResourceKind,
    },

    /// A resource response body could not be decoded.
    #[error("{resource}: malformed response: {source}")]
    Decode {
        /// Resource the response describes
        resource: ResourceKind,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be encoded.
    #[error("request encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// An authenticated request failed at the transport level.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A create call succeeded but the response had no `Location` header.
    #[error("{resource}: created response carried no Location header")]
    MissingLocation {
        /// Resource that was created
        resource: ResourceKind,
    },

    /// The requested status change is not permitted from the current state.
    #[error("{resource}: cannot {requested} while {from}")]
    InvalidTransition {
        /// Resource being changed
        resource: ResourceKind,
        /// Current status
        from: String,
        /// Requested transition
        requested: String,
    },

    /// Invalid input provided to a function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// The category of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::AuthTransport`]
    AuthTransport,
    /// See [`Error::AuthRejected`]
    AuthRejected,
    /// See [`Error::AuthDecode`]
    AuthDecode,
    /// See [`Error::RelationNotFound`]
    RelationNotFound,
    /// See [`Error::ValidationOrDuplicate`]
    ValidationOrDuplicate,
    /// See [`Error::InvalidToken`]
    InvalidToken,
    /// See [`Error::NotAuthorized`]
    NotAuthorized,
    /// See [`Error::ResourceNotFound`]
    ResourceNotFound,
    /// See [`Error::UnclassifiedApi`]
    UnclassifiedApi {
        /// HTTP status code
        status: u16,
    },
    /// See [`Error::UnexpectedStatus`]
    UnexpectedStatus,
    /// See [`Error::Decode`]
    Decode,
    /// See [`Error::Encode`]
    Encode,
    /// See [`Error::Transport`]
    Transport,
    /// See [`Error::MissingLocation`]
    MissingLocation,
    /// See [`Error::InvalidTransition`]
    InvalidTransition,
    /// See [`Error::InvalidInput`]
    InvalidInput,
    /// See [`Error::Config`]
    Config,
    /// See [`Error::UrlParse`]
    UrlParse,
}

/// Classify an HTTP status returned by a resource endpoint.
///
/// Returns `None` for 2xx statuses, which are never errors. Whether a
/// particular 2xx is the one an operation expects is decided by that
/// operation, not here.
///
/// ```
/// use dwolla_rs::error::{map_status, ErrorKind};
/// use reqwest::StatusCode;
///
/// assert_eq!(map_status(StatusCode::NOT_FOUND), Some(ErrorKind::ResourceNotFound));
/// assert_eq!(map_status(StatusCode::CREATED), None);
/// ```
pub fn map_status(status: StatusCode) -> Option<ErrorKind> {
    if status.is_success() {
        return None;
    }
    Some(match status.as_u16() {
        400 => ErrorKind::ValidationOrDuplicate,
        401 => ErrorKind::InvalidToken,
        403 => ErrorKind::NotAuthorized,
        404 => ErrorKind::ResourceNotFound,
        other => ErrorKind::UnclassifiedApi { status: other },
    })
}

/// Error document returned by the API alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code, e.g. `ValidationError`
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Per-field validation failures
    #[serde(default, rename = "_embedded")]
    embedded: Option<EmbeddedErrors>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct EmbeddedErrors {
    #[serde(default)]
    errors: Vec<FieldError>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// Error code, e.g. `Required` or `Duplicate`
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// JSON pointer to the offending field, e.g. `/email`
    #[serde(default)]
    pub path: Option<String>,
}

impl ApiErrorBody {
    /// Decode an error body, tolerating empty or non-JSON payloads.
    pub(crate) fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        serde_json::from_slice(bytes).ok()
    }

    /// Field-level validation failures, if any were reported.
    pub fn field_errors(&self) -> &[FieldError] {
        self.embedded
            .as_ref()
            .map(|e| e.errors.as_slice())
            .unwrap_or_default()
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (None, Some(message)) => f.write_str(message),
            (Some(code), None) => f.write_str(code),
            (None, None) => f.write_str("no details"),
        }
    }
}

fn message_of(body: &Option<ApiErrorBody>) -> String {
    body.as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "no details".to_string())
}

impl Error {
    /// Build the error for a non-success status returned while operating on
    /// `resource`.
    ///
    /// A 2xx status passed here is reported as [`Error::UnclassifiedApi`];
    /// callers are expected to handle success statuses before mapping.
    pub fn from_status(status: StatusCode, resource: ResourceKind, body: Option<ApiErrorBody>) -> Self {
        match map_status(status) {
            Some(ErrorKind::ValidationOrDuplicate) => Error::ValidationOrDuplicate { resource, body },
            Some(ErrorKind::InvalidToken) => Error::InvalidToken { resource },
            Some(ErrorKind::NotAuthorized) => Error::NotAuthorized { resource, body },
            Some(ErrorKind::ResourceNotFound) => Error::ResourceNotFound { resource, body },
            _ => Error::UnclassifiedApi {
                status: status.as_u16(),
                resource,
                body,
            },
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AuthTransport(_) => ErrorKind::AuthTransport,
            Error::AuthRejected { .. } => ErrorKind::AuthRejected,
            Error::AuthDecode(_) => ErrorKind::AuthDecode,
            Error::RelationNotFound { .. } => ErrorKind::RelationNotFound,
            Error::ValidationOrDuplicate { .. } => ErrorKind::ValidationOrDuplicate,
            Error::InvalidToken { .. } => ErrorKind::InvalidToken,
            Error::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            Error::ResourceNotFound { .. } => ErrorKind::ResourceNotFound,
            Error::UnclassifiedApi { status, .. } => ErrorKind::UnclassifiedApi { status: *status },
            Error::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Encode(_) => ErrorKind::Encode,
            Error::Transport(_) => ErrorKind::Transport,
            Error::MissingLocation { .. } => ErrorKind::MissingLocation,
            Error::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Config(_) => ErrorKind::Config,
            Error::UrlParse(_) => ErrorKind::UrlParse,
        }
    }

    /// The HTTP status behind this error, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AuthRejected { status, .. }
            | Error::UnclassifiedApi { status, .. }
            | Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::ValidationOrDuplicate { .. } => Some(400),
            Error::InvalidToken { .. } => Some(401),
            Error::NotAuthorized { .. } => Some(403),
            Error::ResourceNotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// The decoded API error body, when the server sent one.
    pub fn api_body(&self) -> Option<&ApiErrorBody> {
        match self {
            Error::AuthRejected { body, .. }
            | Error::ValidationOrDuplicate { body, .. }
            | Error::NotAuthorized { body, .. }
            | Error::ResourceNotFound { body, .. }
            | Error::UnclassifiedApi { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if the bearer token was rejected and a single retry
    /// after [`DwollaClient::invalidate_token`](crate::DwollaClient::invalidate_token)
    /// is appropriate.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Error::InvalidToken { .. })
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::AuthTransport(_)
                | Error::AuthRejected { .. }
                | Error::AuthDecode(_)
                | Error::InvalidToken { .. }
        )
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, missing relation, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::UnclassifiedApi { status, .. } => (400..500).contains(status),
            Error::ValidationOrDuplicate { .. }
            | Error::NotAuthorized { .. }
            | Error::ResourceNotFound { .. }
            | Error::RelationNotFound { .. }
            | Error::InvalidTransition { .. }
            | Error::InvalidInput(_)
            | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::UnclassifiedApi { status, .. } | Error::AuthRejected { status, .. } => {
                *status >= 500
            }
            _ => false,
        }
    }

    pub(crate) fn relation_not_found(relation: &str) -> Self {
        Error::RelationNotFound {
            relation: relation.to_string(),
        }
    }
}
