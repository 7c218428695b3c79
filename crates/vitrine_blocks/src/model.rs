//! Typed payloads for each block kind.
//!
//! Every field the content API may omit is optional or defaulted; the only
//! way a known block fails to decode is a field of the wrong type.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default rendered media size, in pixels.
pub const DEFAULT_MEDIA_SIZE: u32 = 700;

/// Responsive widths used when a media block does not list its own.
pub const DEFAULT_MEDIA_WIDTHS: [u32; 7] = [380, 480, 680, 960, 1200, 1440, 1800];

/// The content API sends `null` for an empty repeatable field.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleTag {
    H1,
    H2,
    H3,
    H4,
}

impl TitleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleTag::H1 => "h1",
            TitleTag::H2 => "h2",
            TitleTag::H3 => "h3",
            TitleTag::H4 => "h4",
        }
    }
}

/// An uploaded file (image or video).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cta {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtaEntry {
    #[serde(default)]
    pub cta: Cta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyLocation {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroDesign {
    #[serde(default)]
    pub copy_location: CopyLocation,
    #[serde(default)]
    pub overlay_opacity: f64,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_tag: Option<TitleTag>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ctas: Vec<CtaEntry>,
    #[serde(default)]
    pub image: Option<Asset>,
    #[serde(default)]
    pub video: Option<Asset>,
    #[serde(default)]
    pub design: Option<HeroDesign>,
}

/// A referenced entry (product, product line or category).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<Asset>,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardEntry {
    #[serde(default)]
    pub card: Card,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_tag: Option<TitleTag>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub load_first_image_eager: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reference: Vec<Reference>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cards: Vec<CardEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    #[serde(default)]
    pub image: Option<Asset>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub crop: bool,
    #[serde(default)]
    pub widths: Option<Vec<u32>>,
}

impl MediaBlock {
    pub fn rendered_size(&self) -> (u32, u32) {
        (
            self.width.filter(|w| *w > 0).unwrap_or(DEFAULT_MEDIA_SIZE),
            self.height.filter(|h| *h > 0).unwrap_or(DEFAULT_MEDIA_SIZE),
        )
    }

    pub fn rendered_widths(&self) -> &[u32] {
        match self.widths.as_deref() {
            Some(widths) if !widths.is_empty() => widths,
            _ => &DEFAULT_MEDIA_WIDTHS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_tag: Option<TitleTag>,
    /// JSON rich-text document, kept as-is.
    #[serde(default)]
    pub content: Option<Value>,
    /// Pre-rendered HTML; wins over `content` when present.
    #[serde(default)]
    pub alternative_content: Option<String>,
    #[serde(default)]
    pub ctas: Option<Cta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwoColumn {
    #[serde(default)]
    pub media_first: bool,
    #[serde(default)]
    pub media: Option<MediaBlock>,
    #[serde(default)]
    pub rich_text: Option<RichText>,
}
