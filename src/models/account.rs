//! Master account model.

use serde::{Deserialize, Serialize};

use super::enums::ResourceKind;
use super::links::{LinkMap, Resource};
use super::primitives::AccountId;

/// The application's master account.
///
/// Its link map is the entry point to account-level collections:
/// `funding-sources`, `transfers`, `mass-payments`,
/// `on-demand-authorizations`, and `send` (where new transfers are posted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Hypermedia links
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    /// Account identifier
    pub id: AccountId,
    /// Account holder name
    pub name: String,
    /// Timezone offset, when reported
    #[serde(default, rename = "timezoneOffset")]
    pub timezone_offset: Option<i32>,
}

impl Resource for Account {
    const KIND: ResourceKind = ResourceKind::Account;

    fn links(&self) -> &LinkMap {
        &self.links
    }
}
