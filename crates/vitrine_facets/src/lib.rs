//! Vitrine facet engine.
//!
//! Computes per-term facet counts for a product listing under compound
//! filter selection, and coordinates selection changes with refetches of the
//! displayed page.

pub mod catalog;
pub mod controller;
pub mod engine;
pub mod error;
pub mod index;
pub mod selection;
pub mod session;
pub mod source;
pub mod vocabulary;

pub use catalog::{candidates, load_catalog, Item, Product, TagAssignment};
pub use controller::{FilterController, FilterSnapshot, PageOutcome, PageRequest, RequestSeq};
pub use engine::{compute_facets, facet, Facet, FacetTerm};
pub use error::{CatalogError, FacetError, PageSourceError, SessionError, VocabularyError};
pub use index::FacetIndex;
pub use selection::Selection;
pub use session::{FilterHandle, FilterSession};
pub use source::{
    CatalogPageSource, ItemPage, OrderDirection, PageOptions, PageQuery, PageSource, ProductOrder,
};
pub use vitrine_ids::{CategoryKey, ItemUid, TermUid};
pub use vocabulary::{FacetCategoryDef, FacetTermDef, FacetVocabulary};
