//! Catalog records as the content API delivers them.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use vitrine_ids::{CategoryKey, ItemUid, TermUid};

use crate::error::CatalogError;

/// A (category key, term uid) pair attached to an item.
///
/// Missing fields deserialize to the empty key, which no vocabulary entry
/// can carry, so a malformed assignment matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagAssignment {
    #[serde(default)]
    pub taxonomy_uid: CategoryKey,
    #[serde(default)]
    pub term_uid: TermUid,
}

impl TagAssignment {
    pub fn new(taxonomy_uid: CategoryKey, term_uid: TermUid) -> Self {
        Self {
            taxonomy_uid,
            term_uid,
        }
    }

    pub fn is(&self, key: &str, term: &str) -> bool {
        self.taxonomy_uid.as_str() == key && self.term_uid.as_str() == term
    }
}

/// A candidate item: identifier plus its tag assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub uid: ItemUid,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub taxonomies: Vec<TagAssignment>,
}

impl Item {
    pub fn new(uid: ItemUid, taxonomies: Vec<TagAssignment>) -> Self {
        Self { uid, taxonomies }
    }

    pub fn has_tag(&self, key: &str, term: &str) -> bool {
        self.taxonomies.iter().any(|t| t.is(key, term))
    }

    /// True if some assignment under `key` names one of `terms`.
    pub fn has_any<'a, I>(&self, key: &str, terms: I) -> bool
    where
        I: IntoIterator<Item = &'a TermUid> + Clone,
    {
        self.taxonomies.iter().any(|t| {
            t.taxonomy_uid.as_str() == key && terms.clone().into_iter().any(|s| *s == t.term_uid)
        })
    }
}

/// A displayable product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub uid: ItemUid,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub taxonomies: Vec<TagAssignment>,
}

impl Product {
    /// Project to the `{uid, taxonomies}` shape used for counting.
    pub fn as_item(&self) -> Item {
        Item::new(self.uid.clone(), self.taxonomies.clone())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a JSON array of products.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let products: Vec<Product> =
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let untagged = products.iter().filter(|p| p.taxonomies.is_empty()).count();
    tracing::info!(
        path = %path.display(),
        products = products.len(),
        untagged,
        "Loaded catalog"
    );
    Ok(products)
}

/// Candidate set for counting, one item per product.
pub fn candidates(products: &[Product]) -> Vec<Item> {
    products.iter().map(Product::as_item).collect()
}
