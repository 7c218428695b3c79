//! The filtered-page boundary.
//!
//! Facet counts come from the full candidate set; the grid of products shown
//! next to them comes from a page source queried with the current selection.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vitrine_ids::{CategoryKey, TermUid};

use crate::catalog::Product;
use crate::error::PageSourceError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductOrder {
    #[default]
    Title,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl ProductOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductOrder::Title => "title",
            ProductOrder::Price => "price",
            ProductOrder::CreatedAt => "created_at",
            ProductOrder::UpdatedAt => "updated_at",
        }
    }
}

impl std::str::FromStr for ProductOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(ProductOrder::Title),
            "price" => Ok(ProductOrder::Price),
            "created_at" => Ok(ProductOrder::CreatedAt),
            "updated_at" => Ok(ProductOrder::UpdatedAt),
            other => Err(format!("unknown order field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// Pagination and ordering, independent of the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    pub limit: Option<usize>,
    pub skip: usize,
    pub order: ProductOrder,
    pub direction: OrderDirection,
}

/// A request for one page of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Category key to accepted terms; empty means no filter.
    pub taxonomies: BTreeMap<CategoryKey, Vec<TermUid>>,
    #[serde(flatten)]
    pub options: PageOptions,
}

impl PageQuery {
    /// Whether `product` satisfies every taxonomy filter. A key with no
    /// terms does not filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.taxonomies.iter().all(|(key, terms)| {
            terms.is_empty()
                || product
                    .taxonomies
                    .iter()
                    .any(|t| t.taxonomy_uid == *key && terms.contains(&t.term_uid))
        })
    }
}

/// The products to display plus the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<Product>,
    pub total_count: usize,
}

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ItemPage, PageSourceError>;
}

/// Page source over an in-memory product list.
#[derive(Debug, Clone)]
pub struct CatalogPageSource {
    products: Arc<[Product]>,
}

impl CatalogPageSource {
    pub fn new(products: impl Into<Arc<[Product]>>) -> Self {
        Self {
            products: products.into(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Synchronous form of [`PageSource::fetch_page`].
    pub fn query(&self, query: &PageQuery) -> ItemPage {
        let mut matched: Vec<&Product> =
            self.products.iter().filter(|p| query.matches(p)).collect();
        let total_count = matched.len();

        let options = query.options;
        matched.sort_by(|a, b| compare(a, b, options.order, options.direction));

        let items = matched
            .into_iter()
            .skip(options.skip)
            .take(options.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        ItemPage { items, total_count }
    }
}

#[async_trait]
impl PageSource for CatalogPageSource {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ItemPage, PageSourceError> {
        Ok(self.query(query))
    }
}

/// Order by the requested field; products missing the field go last in
/// either direction, ties break on title then uid.
fn compare(a: &Product, b: &Product, order: ProductOrder, direction: OrderDirection) -> Ordering {
    fn present_first<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering, desc: bool) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => {
                let ord = cmp(a, b);
                if desc {
                    ord.reverse()
                } else {
                    ord
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    let desc = direction == OrderDirection::Desc;
    let primary = match order {
        ProductOrder::Title => {
            let ord = a.title.cmp(&b.title);
            if desc {
                ord.reverse()
            } else {
                ord
            }
        }
        ProductOrder::Price => present_first(a.price, b.price, |x, y| x.total_cmp(&y), desc),
        ProductOrder::CreatedAt => present_first(a.created_at, b.created_at, |x, y| x.cmp(&y), desc),
        ProductOrder::UpdatedAt => present_first(a.updated_at, b.updated_at, |x, y| x.cmp(&y), desc),
    };

    primary
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.uid.cmp(&b.uid))
}
