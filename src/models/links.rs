//! HAL hypermedia links.
//!
//! Every response body carries a `_links` object mapping relation names to
//! link descriptors. The client never builds endpoint paths itself; it looks
//! the relation up in the relevant [`LinkMap`] and follows the `href`.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::enums::ResourceKind;
use crate::{Error, Result};

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Link {
    /// Absolute URL of the target
    pub href: String,
    /// Media type of the target representation
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Kind of resource the link points at, e.g. `customer`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl Link {
    /// Create a link with only an `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            media_type: None,
            resource_type: None,
        }
    }
}

/// Relation name to link mapping, as found under `_links`.
///
/// # Example
///
/// ```
/// use dwolla_rs::models::LinkMap;
///
/// let links: LinkMap = serde_json::from_str(
///     r#"{ "account": { "href": "https://x/accounts/1" } }"#,
/// ).unwrap();
///
/// assert_eq!(links.resolve("account").unwrap(), "https://x/accounts/1");
/// assert!(links.resolve("customers").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkMap(HashMap<String, Link>);

impl LinkMap {
    /// Create an empty link map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the URL for `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelationNotFound`] if the relation is not advertised.
    pub fn resolve(&self, relation: &str) -> Result<&str> {
        self.0
            .get(relation)
            .map(|link| link.href.as_str())
            .ok_or_else(|| Error::relation_not_found(relation))
    }

    /// Get the full link descriptor for `relation`.
    pub fn get(&self, relation: &str) -> Option<&Link> {
        self.0.get(relation)
    }

    /// Returns `true` if the relation is advertised.
    pub fn contains(&self, relation: &str) -> bool {
        self.0.contains_key(relation)
    }

    /// Add or replace a relation.
    pub fn insert(&mut self, relation: impl Into<String>, link: Link) -> Option<Link> {
        self.0.insert(relation.into(), link)
    }

    /// Iterate over relation names.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of relations in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no relations are advertised.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Link)> for LinkMap {
    fn from_iter<I: IntoIterator<Item = (K, Link)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A resource that carries its own link map.
pub trait Resource {
    /// Which kind of resource this is, used for error context.
    const KIND: ResourceKind;

    /// The resource's `_links`.
    fn links(&self) -> &LinkMap;

    /// Resolve one of the resource's own relations.
    fn resolve(&self, relation: &str) -> Result<&str> {
        self.links().resolve(relation)
    }
}

/// Body of a root or collection response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Linked {
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
}

/// A page of a HAL collection.
///
/// Items live under `_embedded.<relation>`; the next page, if any, is the
/// `next` relation of the page's own link map.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct HalCollection<T> {
    /// The page's own links (`self`, `first`, `last`, `next`, ...)
    #[serde(rename = "_links", default)]
    pub links: LinkMap,
    #[serde(rename = "_embedded", default = "HashMap::new")]
    embedded: HashMap<String, Vec<T>>,
    /// Total number of items across all pages, when reported
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> HalCollection<T> {
    /// Take the items embedded under `relation`.
    ///
    /// A page with no embedded items for the relation yields an empty list.
    pub fn into_items(mut self, relation: &str) -> Vec<T> {
        self.embedded.remove(relation).unwrap_or_default()
    }

    /// URL of the next page, if there is one.
    pub fn next_page(&self) -> Option<&str> {
        self.links.get("next").map(|link| link.href.as_str())
    }
}
