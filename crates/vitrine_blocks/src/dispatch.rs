//! Mapping raw modular-block JSON onto the closed set of block kinds.
//!
//! The content API delivers each block as a single-key object,
//! `{"hero": {...props}}`. The key selects the kind; anything outside the
//! known kinds becomes [`ContentBlock::Unknown`] rather than an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BlockError;
use crate::model::{Hero, ListBlock, MediaBlock, RichText, TwoColumn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Hero,
    List,
    TwoColumn,
    Media,
    RichText,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Hero,
        BlockKind::List,
        BlockKind::TwoColumn,
        BlockKind::Media,
        BlockKind::RichText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::List => "list",
            BlockKind::TwoColumn => "two_column",
            BlockKind::Media => "media",
            BlockKind::RichText => "rich_text",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BlockKind {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BlockError::UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Hero(Hero),
    List(ListBlock),
    TwoColumn(TwoColumn),
    Media(MediaBlock),
    RichText(RichText),
    /// Props that did not decode into the kind's payload.
    Invalid {
        block: BlockKind,
        reason: String,
        props: Value,
    },
    Unknown {
        name: String,
        props: Value,
    },
}

impl ContentBlock {
    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            ContentBlock::Hero(_) => Some(BlockKind::Hero),
            ContentBlock::List(_) => Some(BlockKind::List),
            ContentBlock::TwoColumn(_) => Some(BlockKind::TwoColumn),
            ContentBlock::Media(_) => Some(BlockKind::Media),
            ContentBlock::RichText(_) => Some(BlockKind::RichText),
            ContentBlock::Invalid { block, .. } => Some(*block),
            ContentBlock::Unknown { .. } => None,
        }
    }

    /// Decode `props` as a block named `name`.
    pub fn decode(name: &str, props: Value) -> Self {
        let Ok(kind) = name.parse::<BlockKind>() else {
            tracing::debug!(name, "No component for block");
            return ContentBlock::Unknown {
                name: name.to_string(),
                props,
            };
        };

        let decoded = match kind {
            BlockKind::Hero => typed(&props).map(ContentBlock::Hero),
            BlockKind::List => typed(&props).map(ContentBlock::List),
            BlockKind::TwoColumn => typed(&props).map(ContentBlock::TwoColumn),
            BlockKind::Media => typed(&props).map(ContentBlock::Media),
            BlockKind::RichText => typed(&props).map(ContentBlock::RichText),
        };

        decoded.unwrap_or_else(|err| {
            tracing::warn!(block = %kind, error = %err, "Block props did not decode");
            ContentBlock::Invalid {
                block: kind,
                reason: err.to_string(),
                props,
            }
        })
    }
}

fn typed<T: DeserializeOwned>(props: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(props)
}

/// A block with its stable render key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub key: String,
    pub index: usize,
    pub block: ContentBlock,
}

/// Map raw blocks in page order.
///
/// Entries that are not objects, are empty, or carry `null` props are
/// skipped. The key is `props._metadata.uid` when present, otherwise
/// `component--{index}`.
pub fn map_blocks(raw: &[Value]) -> Vec<PlacedBlock> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let (name, props) = entry.as_object()?.iter().next()?;
            if name.is_empty() || props.is_null() {
                return None;
            }

            let key = props
                .pointer("/_metadata/uid")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("component--{}", index));

            Some(PlacedBlock {
                key,
                index,
                block: ContentBlock::decode(name, props.clone()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.as_str().parse::<BlockKind>().unwrap(), kind);
        }
        assert!(matches!(
            "carousel".parse::<BlockKind>(),
            Err(BlockError::UnknownKind(name)) if name == "carousel"
        ));
    }

    #[test]
    fn test_map_blocks_dispatches_by_key() {
        let raw = vec![
            json!({"hero": {"title": "Spring", "_metadata": {"uid": "cs01"}}}),
            json!({"media": {"image": {"url": "https://img/1.jpg"}, "crop": true}}),
            json!({"carousel": {"slides": 3}}),
        ];
        let blocks = map_blocks(&raw);
        assert_eq!(blocks.len(), 3);

        assert_eq!(blocks[0].key, "cs01");
        assert!(matches!(&blocks[0].block, ContentBlock::Hero(h) if h.title.as_deref() == Some("Spring")));

        assert_eq!(blocks[1].key, "component--1");
        assert_eq!(blocks[1].block.kind(), Some(BlockKind::Media));

        assert!(matches!(&blocks[2].block, ContentBlock::Unknown { name, .. } if name == "carousel"));
        assert_eq!(blocks[2].block.kind(), None);
    }

    #[test]
    fn test_empty_and_null_entries_are_skipped() {
        let raw = vec![json!({}), json!({"list": null}), json!("hero"), json!({"list": {}})];
        let blocks = map_blocks(&raw);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].index, 3);
        assert_eq!(blocks[0].key, "component--3");
    }

    #[test]
    fn test_null_lists_do_not_invalidate_block() {
        let block = ContentBlock::decode("list", json!({"title": "Lines", "cards": null}));
        assert!(matches!(block, ContentBlock::List(ref list) if list.cards.is_empty()));
        let block = ContentBlock::decode("hero", json!({"ctas": null}));
        assert_eq!(block.kind(), Some(BlockKind::Hero));
        assert!(matches!(block, ContentBlock::Hero(_)));
    }

    #[test]
    fn test_wrong_typed_props_become_invalid() {
        let block = ContentBlock::decode("media", json!({"width": "wide"}));
        match block {
            ContentBlock::Invalid { block, props, .. } => {
                assert_eq!(block, BlockKind::Media);
                assert_eq!(props["width"], "wide");
            }
            other => panic!("expected invalid block, got {:?}", other),
        }
    }
}
