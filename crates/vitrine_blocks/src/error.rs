//! Block errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockError {
    #[error("unknown block kind: {0}")]
    UnknownKind(String),

    #[error("failed to parse page document: {0}")]
    Page(#[from] serde_json::Error),
}
