//! Error types for the facet crate.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with a facet vocabulary definition.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("vocabulary defines no categories")]
    Empty,

    #[error("category at position {0} has an empty display name")]
    EmptyName(usize),

    #[error("duplicate category name: {0}")]
    DuplicateName(String),

    #[error("duplicate category key: {0}")]
    DuplicateKey(String),

    #[error("category '{category}' repeats term '{term}'")]
    DuplicateTerm { category: String, term: String },

    #[error("category '{category}': {reason}")]
    InvalidId { category: String, reason: String },
}

/// Problems loading a product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Facet engine failures. Counting itself cannot fail; only index
/// construction has a limit.
#[derive(Debug, Error)]
pub enum FacetError {
    #[error("catalog has {0} candidates, more than a facet index can address")]
    CatalogTooLarge(usize),
}

/// Failures reported by a page source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageSourceError {
    #[error("page source unavailable: {0}")]
    Unavailable(String),

    #[error("page query failed: {0}")]
    Query(String),
}

/// Errors talking to a running filter session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("filter session has shut down")]
    Closed,

    #[error("filter session task failed: {0}")]
    Join(String),
}
