//! Resource statuses and the status changes a client may request.
//!
//! The server owns every status. The client only checks a requested change
//! against the rules below before sending it, so an obviously invalid request
//! fails locally with [`Error::InvalidTransition`] instead of round-tripping.
//!
//! # Example
//!
//! ```
//! use dwolla_rs::models::{CustomerStatus, CustomerTransition, Lifecycle};
//!
//! assert!(CustomerStatus::Verified.permits(CustomerTransition::Suspend));
//! assert!(CustomerStatus::Unverified.check(CustomerTransition::Suspend).is_err());
//! assert_eq!(
//!     CustomerStatus::Suspended.check(CustomerTransition::Reactivate).unwrap(),
//!     CustomerStatus::Reactivated,
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::enums::ResourceKind;
use crate::{Error, Result};

/// A closed set of resource states with client-requestable transitions.
pub trait Lifecycle: Copy + Eq + fmt::Debug + fmt::Display + Sized {
    /// A status change the client may ask the server for.
    type Transition: Copy + Eq + fmt::Debug + fmt::Display + 'static;

    /// Resource this lifecycle belongs to.
    const RESOURCE: ResourceKind;

    /// Every transition the client knows how to request.
    const TRANSITIONS: &'static [Self::Transition];

    /// Status the resource is expected to reach once `transition` succeeds.
    fn target(transition: Self::Transition) -> Self;

    /// Returns `true` if `transition` may be requested from this status.
    fn permits(self, transition: Self::Transition) -> bool;

    /// Transitions that may be requested from this status.
    fn permitted(self) -> Vec<Self::Transition> {
        Self::TRANSITIONS
            .iter()
            .copied()
            .filter(|t| self.permits(*t))
            .collect()
    }

    /// Validate `transition` and return the expected resulting status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the transition is not
    /// permitted from this status.
    fn check(self, transition: Self::Transition) -> Result<Self> {
        if self.permits(transition) {
            Ok(Self::target(transition))
        } else {
            Err(Error::InvalidTransition {
                resource: Self::RESOURCE,
                from: self.to_string(),
                requested: transition.to_string(),
            })
        }
    }
}

macro_rules! wire_display {
    ($ty:ty { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// Value used on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// Status of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Created without identity verification
    Unverified,
    /// Verification failed once; full SSN and details may be resubmitted
    Retry,
    /// Verification needs an identity document
    Document,
    /// Identity verified
    Verified,
    /// Suspended by the platform or the application
    Suspended,
    /// Deactivated; cannot transact
    Deactivated,
    /// Reactivated after a suspension
    Reactivated,
}

wire_display!(CustomerStatus {
    Unverified => "unverified",
    Retry => "retry",
    Document => "document",
    Verified => "verified",
    Suspended => "suspended",
    Deactivated => "deactivated",
    Reactivated => "reactivated",
});

impl CustomerStatus {
    /// Returns `true` while the customer is waiting on verification input.
    pub fn awaiting_verification(&self) -> bool {
        matches!(
            self,
            CustomerStatus::Unverified | CustomerStatus::Retry | CustomerStatus::Document
        )
    }
}

/// Status change a client may request for a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerTransition {
    /// Upgrade to verified by supplying the full identity details
    Verify,
    /// Suspend a verified customer
    Suspend,
    /// Deactivate a suspended customer
    Deactivate,
    /// Reactivate a suspended customer
    Reactivate,
}

wire_display!(CustomerTransition {
    Verify => "verify",
    Suspend => "suspend",
    Deactivate => "deactivate",
    Reactivate => "reactivate",
});

impl Lifecycle for CustomerStatus {
    type Transition = CustomerTransition;
    const RESOURCE: ResourceKind = ResourceKind::Customer;
    const TRANSITIONS: &'static [CustomerTransition] = &[
        CustomerTransition::Verify,
        CustomerTransition::Suspend,
        CustomerTransition::Deactivate,
        CustomerTransition::Reactivate,
    ];

    fn target(transition: CustomerTransition) -> Self {
        match transition {
            CustomerTransition::Verify => CustomerStatus::Verified,
            CustomerTransition::Suspend => CustomerStatus::Suspended,
            CustomerTransition::Deactivate => CustomerStatus::Deactivated,
            CustomerTransition::Reactivate => CustomerStatus::Reactivated,
        }
    }

    fn permits(self, transition: CustomerTransition) -> bool {
        use CustomerStatus::*;
        use CustomerTransition::*;
        matches!(
            (self, transition),
            (Unverified | Retry | Document, Verify)
                | (Verified, Suspend)
                | (Suspended, Deactivate | Reactivate)
        )
    }
}

// ---------------------------------------------------------------------------
// Funding source
// ---------------------------------------------------------------------------

/// Status of a funding source.
///
/// Removal is not a status: a removed funding source keeps its status and
/// has its `removed` flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingSourceStatus {
    /// Ownership not yet proven
    Unverified,
    /// Ownership proven
    Verified,
}

wire_display!(FundingSourceStatus {
    Unverified => "unverified",
    Verified => "verified",
});

/// Step of the micro-deposit verification protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingSourceTransition {
    /// Ask the server to send two small deposits to the account
    InitiateMicroDeposits,
    /// Report the two observed deposit amounts
    VerifyMicroDeposits,
}

wire_display!(FundingSourceTransition {
    InitiateMicroDeposits => "initiate micro-deposits",
    VerifyMicroDeposits => "verify micro-deposits",
});

impl Lifecycle for FundingSourceStatus {
    type Transition = FundingSourceTransition;
    const RESOURCE: ResourceKind = ResourceKind::FundingSource;
    const TRANSITIONS: &'static [FundingSourceTransition] = &[
        FundingSourceTransition::InitiateMicroDeposits,
        FundingSourceTransition::VerifyMicroDeposits,
    ];

    fn target(transition: FundingSourceTransition) -> Self {
        match transition {
            FundingSourceTransition::InitiateMicroDeposits => FundingSourceStatus::Unverified,
            FundingSourceTransition::VerifyMicroDeposits => FundingSourceStatus::Verified,
        }
    }

    fn permits(self, _transition: FundingSourceTransition) -> bool {
        self == FundingSourceStatus::Unverified
    }
}

/// Status of the micro-deposits sent to a funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicroDepositStatus {
    /// Deposits sent, not yet settled
    Pending,
    /// Deposits settled; amounts may be verified
    Processed,
    /// Deposits could not be delivered
    Failed,
}

wire_display!(MicroDepositStatus {
    Pending => "pending",
    Processed => "processed",
    Failed => "failed",
});

impl MicroDepositStatus {
    /// Returns `true` once the amounts can be submitted for verification.
    pub fn is_verifiable(&self) -> bool {
        matches!(self, MicroDepositStatus::Processed)
    }

    /// Returns `true` if the status will not change anymore.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MicroDepositStatus::Pending)
    }
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Status of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Initiated, not yet settled
    Pending,
    /// Settled
    Processed,
    /// Returned or rejected
    Failed,
    /// Cancelled before settlement
    Cancelled,
}

wire_display!(TransferStatus {
    Pending => "pending",
    Processed => "processed",
    Failed => "failed",
    Cancelled => "cancelled",
});

impl TransferStatus {
    /// Returns `true` if the transfer can no longer change status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransferStatus::Pending)
    }

    /// Returns `true` if a later observation of `next` is consistent with
    /// this status. Only pending transfers move; processing and failure are
    /// decided by the server.
    pub fn can_become(&self, next: TransferStatus) -> bool {
        *self == next || *self == TransferStatus::Pending
    }
}

/// Status change a client may request for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferTransition {
    /// Cancel a pending transfer
    Cancel,
}

wire_display!(TransferTransition {
    Cancel => "cancel",
});

impl Lifecycle for TransferStatus {
    type Transition = TransferTransition;
    const RESOURCE: ResourceKind = ResourceKind::Transfer;
    const TRANSITIONS: &'static [TransferTransition] = &[TransferTransition::Cancel];

    fn target(transition: TransferTransition) -> Self {
        match transition {
            TransferTransition::Cancel => TransferStatus::Cancelled,
        }
    }

    fn permits(self, transition: TransferTransition) -> bool {
        match transition {
            TransferTransition::Cancel => self == TransferStatus::Pending,
        }
    }
}

// ---------------------------------------------------------------------------
// Documents and mass payments (server-driven only)
// ---------------------------------------------------------------------------

/// Review status of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Awaiting review
    Pending,
    /// Reviewed; see the verification status
    Reviewed,
}

wire_display!(DocumentStatus {
    Pending => "pending",
    Reviewed => "reviewed",
});

/// Outcome of a document review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentVerificationStatus {
    /// Document accepted
    Accepted,
    /// Document rejected; see the failure reason
    Rejected,
}

/// Status of a mass payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassPaymentStatus {
    /// Created but held until explicitly started
    Deferred,
    /// Queued for processing
    Pending,
    /// Items are being created
    Processing,
    /// All items processed
    Complete,
    /// Cancelled while deferred
    Cancelled,
}

wire_display!(MassPaymentStatus {
    Deferred => "deferred",
    Pending => "pending",
    Processing => "processing",
    Complete => "complete",
    Cancelled => "cancelled",
});

impl MassPaymentStatus {
    /// Returns `true` if the mass payment can no longer change status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MassPaymentStatus::Complete | MassPaymentStatus::Cancelled)
    }
}
