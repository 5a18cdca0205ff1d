//! Customer models and request bodies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{CustomerType, ResourceKind};
use super::lifecycle::{CustomerStatus, CustomerTransition, Lifecycle};
use super::links::{LinkMap, Resource};
use super::primitives::CustomerId;
use crate::{Error, Result};

/// An individual or business the application transacts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Hypermedia links (`self`, `documents`, `funding-sources`, `transfers`, ...)
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Customer identifier
    pub id: CustomerId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Verification tier
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    /// Current status
    pub status: CustomerStatus,
    /// When the customer was created
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    /// Business name, for business customers
    #[serde(default)]
    pub business_name: Option<String>,
    /// Application-assigned correlation identifier
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// First address line
    #[serde(default)]
    pub address1: Option<String>,
    /// Second address line
    #[serde(default)]
    pub address2: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// Two-letter state code
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl Customer {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Validate `transition` against the customer's current status.
    pub fn check(&self, transition: CustomerTransition) -> Result<CustomerStatus> {
        self.status.check(transition)
    }
}

impl Resource for Customer {
    const KIND: ResourceKind = ResourceKind::Customer;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}

/// Body for creating an unverified or receive-only customer.
///
/// # Example
///
/// ```
/// use dwolla_rs::models::NewCustomer;
///
/// let customer = NewCustomer::new("Jane", "Doe", "jane@example.com")
///     .correlation_id("crm-4412")
///     .receive_only();
/// assert!(customer.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address, unique per application
    pub email: String,
    /// Tier; omitted means unverified
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
    /// Business name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// End user's IP address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Application-assigned correlation identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl NewCustomer {
    /// Start an unverified customer.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            customer_type: None,
            business_name: None,
            ip_address: None,
            correlation_id: None,
        }
    }

    /// Make this a receive-only customer.
    pub fn receive_only(mut self) -> Self {
        self.customer_type = Some(CustomerType::ReceiveOnly);
        self
    }

    /// Set the business name.
    pub fn business_name(mut self, name: impl Into<String>) -> Self {
        self.business_name = Some(name.into());
        self
    }

    /// Set the end user's IP address.
    pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Set a correlation identifier.
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Check required fields before sending.
    pub fn validate(&self) -> Result<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(Error::InvalidInput(format!(
                "email `{}` is not an email address",
                self.email
            )));
        }
        if matches!(
            self.customer_type,
            Some(CustomerType::Personal | CustomerType::Business)
        ) {
            return Err(Error::InvalidInput(
                "verified customers are created with VerifiedCustomerBuilder".to_string(),
            ));
        }
        Ok(())
    }
}

/// Identity details required to upgrade a customer to verified.
///
/// Built with [`VerifiedCustomerBuilder`], which rejects incomplete KYC
/// data before anything is sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedCustomer {
    first_name: String,
    last_name: String,
    email: String,
    #[serde(rename = "type")]
    customer_type: CustomerType,
    address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address2: Option<String>,
    city: String,
    state: String,
    postal_code: String,
    date_of_birth: NaiveDate,
    ssn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,
}

/// Builder for [`VerifiedCustomer`] with validation.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dwolla_rs::models::VerifiedCustomerBuilder;
///
/// let details = VerifiedCustomerBuilder::new()
///     .name("Jane", "Doe")
///     .email("jane@example.com")
///     .address("99-99 33rd St", None::<String>, "Some City", "NY", "11101")
///     .date_of_birth(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
///     .ssn("1234")
///     .build()
///     .unwrap();
/// # let _ = details;
/// ```
#[derive(Debug, Default, Clone)]
pub struct VerifiedCustomerBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    address1: Option<String>,
    address2: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    date_of_birth: Option<NaiveDate>,
    ssn: Option<String>,
    phone: Option<String>,
    ip_address: Option<String>,
}

impl VerifiedCustomerBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill name and email from an existing customer.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            first_name: Some(customer.first_name.clone()),
            last_name: Some(customer.last_name.clone()),
            email: Some(customer.email.clone()),
            ..Self::default()
        }
    }

    /// Set first and last name.
    pub fn name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Set the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the residential address.
    pub fn address(
        mut self,
        address1: impl Into<String>,
        address2: Option<impl Into<String>>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        self.address1 = Some(address1.into());
        self.address2 = address2.map(Into::into);
        self.city = Some(city.into());
        self.state = Some(state.into());
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Set the date of birth.
    pub fn date_of_birth(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    /// Set the SSN: the last four digits, or all nine on retry.
    pub fn ssn(mut self, ssn: impl Into<String>) -> Self {
        self.ssn = Some(ssn.into());
        self
    }

    /// Set the phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the end user's IP address.
    pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Build the verification details, validating every required field.
    pub fn build(self) -> Result<VerifiedCustomer> {
        let first_name = required("first_name", self.first_name)?;
        let last_name = required("last_name", self.last_name)?;
        let email = required("email", self.email)?;
        let address1 = required("address1", self.address1)?;
        let city = required("city", self.city)?;
        let state = required("state", self.state)?;
        let postal_code = required("postal_code", self.postal_code)?;
        let ssn = required("ssn", self.ssn)?;
        let date_of_birth = self
            .date_of_birth
            .ok_or_else(|| Error::InvalidInput("date_of_birth is required".to_string()))?;

        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidInput(format!(
                "state must be a two-letter code, got `{state}`"
            )));
        }

        let digits = ssn.chars().filter(char::is_ascii_digit).count();
        if !(digits == 4 || digits == 9) || ssn.chars().any(|c| !c.is_ascii_digit() && c != '-') {
            return Err(Error::InvalidInput(
                "ssn must be the last 4 digits or the full 9 digits".to_string(),
            ));
        }

        Ok(VerifiedCustomer {
            first_name,
            last_name,
            email,
            customer_type: CustomerType::Personal,
            address1,
            address2: self.address2,
            city,
            state: state.to_ascii_uppercase(),
            postal_code,
            date_of_birth,
            ssn,
            phone: self.phone,
            ip_address: self.ip_address,
        })
    }
}

/// Body for updating a customer's contact details.
///
/// Status changes go through the dedicated service methods instead.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New first address line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// New second address line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// New city
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// New state code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// New postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// New phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CustomerUpdate {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.address1.is_none()
            && self.address2.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
            && self.phone.is_none()
    }
}

/// Body of a bare status change: `{"status": "suspended"}`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct StatusChange<S> {
    pub status: S,
}

/// Token handed to the browser-side drop-in components.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientToken {
    /// Hypermedia links
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Single-use token value
    pub token: String,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::InvalidInput(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::InvalidInput(format!("{field} is required"))),
    }
}
