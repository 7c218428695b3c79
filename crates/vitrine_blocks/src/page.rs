//! Page documents carrying modular blocks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dispatch::{map_blocks, PlacedBlock};
use crate::error::BlockError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Option<Vec<Value>>,
}

impl Page {
    pub fn blocks(&self) -> Vec<PlacedBlock> {
        self.components
            .as_deref()
            .map(map_blocks)
            .unwrap_or_default()
    }
}

pub fn parse_page(raw: &str) -> Result<Page, BlockError> {
    Ok(serde_json::from_str(raw)?)
}
