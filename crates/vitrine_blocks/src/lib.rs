//! Modular content blocks for Vitrine pages.
//!
//! A page's `components` field is a list of single-key objects naming a block
//! kind. Blocks are decoded into a closed tagged union and rendered with an
//! exhaustive match; unrecognised names fall through to an explicit unknown
//! variant.

pub mod dispatch;
pub mod error;
pub mod model;
pub mod outline;
pub mod page;

pub use dispatch::{map_blocks, BlockKind, ContentBlock, PlacedBlock};
pub use error::BlockError;
pub use model::{
    Asset, Card, CopyLocation, Cta, Hero, HeroDesign, Link, ListBlock, MediaBlock, Reference,
    RichText, Theme, TitleTag, TwoColumn, DEFAULT_MEDIA_SIZE, DEFAULT_MEDIA_WIDTHS,
};
pub use outline::render_outline;
pub use page::{parse_page, Page};
