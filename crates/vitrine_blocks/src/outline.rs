//! Plain-text outline of a page's blocks.

use crate::dispatch::{ContentBlock, PlacedBlock};
use crate::model::{Cta, Hero, ListBlock, MediaBlock, RichText, TwoColumn};

const INDENT: &str = "  ";

pub fn render_outline(blocks: &[PlacedBlock]) -> String {
    let mut out = String::new();
    for placed in blocks {
        render_block(&mut out, &placed.key, &placed.block, 0);
    }
    out
}

fn line(out: &mut String, depth: usize, text: impl AsRef<str>) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text.as_ref());
    out.push('\n');
}

fn heading(title: &Option<String>, tag: Option<&'static str>) -> String {
    match title {
        Some(title) => format!("{} <{}>", title, tag.unwrap_or("p")),
        None => "(untitled)".to_string(),
    }
}

fn render_block(out: &mut String, key: &str, block: &ContentBlock, depth: usize) {
    match block {
        ContentBlock::Hero(hero) => render_hero(out, key, hero, depth),
        ContentBlock::List(list) => render_list(out, key, list, depth),
        ContentBlock::TwoColumn(columns) => render_two_column(out, key, columns, depth),
        ContentBlock::Media(media) => render_media(out, key, media, depth),
        ContentBlock::RichText(text) => render_rich_text(out, key, text, depth),
        ContentBlock::Invalid { block, reason, .. } => {
            line(out, depth, format!("[{}] {} invalid: {}", block, key, reason));
        }
        ContentBlock::Unknown { name, props } => {
            line(out, depth, format!("No component found for: {}", name));
            let pretty = serde_json::to_string_pretty(props).unwrap_or_else(|_| props.to_string());
            for text in pretty.lines() {
                line(out, depth + 1, text);
            }
        }
    }
}

fn render_cta(out: &mut String, cta: &Cta, depth: usize) {
    let text = cta.text.as_deref().unwrap_or("(no text)");
    match &cta.link {
        Some(link) => line(out, depth, format!("cta: {} -> {}", text, link.href)),
        None => line(out, depth, format!("cta: {}", text)),
    }
}

fn render_hero(out: &mut String, key: &str, hero: &Hero, depth: usize) {
    let tag = hero.title_tag.map(|t| t.as_str());
    line(out, depth, format!("[hero] {} {}", key, heading(&hero.title, tag)));
    if let Some(description) = &hero.description {
        line(out, depth + 1, description);
    }
    if let Some(design) = &hero.design {
        line(
            out,
            depth + 1,
            format!(
                "design: copy {:?}, theme {:?}, overlay {:.2}",
                design.copy_location, design.theme, design.overlay_opacity
            ),
        );
    }
    if let Some(video) = &hero.video {
        line(out, depth + 1, format!("video: {}", video.url));
    } else if let Some(image) = &hero.image {
        line(out, depth + 1, format!("image: {}", image.url));
    }
    for entry in &hero.ctas {
        render_cta(out, &entry.cta, depth + 1);
    }
}

fn render_list(out: &mut String, key: &str, list: &ListBlock, depth: usize) {
    let tag = list.title_tag.map(|t| t.as_str());
    line(out, depth, format!("[list] {} {}", key, heading(&list.title, tag)));
    if let Some(description) = &list.description {
        line(out, depth + 1, description);
    }
    for (pos, reference) in list.reference.iter().enumerate() {
        let eager = list.load_first_image_eager && pos == 0;
        line(
            out,
            depth + 1,
            format!(
                "ref: {} {}{}",
                reference.title,
                reference.url.as_deref().unwrap_or(""),
                if eager { " (eager)" } else { "" }
            ),
        );
    }
    for entry in &list.cards {
        let card = &entry.card;
        let href = card.link.as_ref().map(|l| l.href.as_str()).unwrap_or("");
        line(
            out,
            depth + 1,
            format!("card: {} {}", card.title.as_deref().unwrap_or("(untitled)"), href),
        );
    }
}

fn render_media(out: &mut String, key: &str, media: &MediaBlock, depth: usize) {
    let (width, height) = media.rendered_size();
    let url = media.image.as_ref().map(|i| i.url.as_str()).unwrap_or("(no image)");
    let widths = media
        .rendered_widths()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    line(
        out,
        depth,
        format!("[media] {} {} {}x{} widths={}", key, url, width, height, widths),
    );
}

fn render_rich_text(out: &mut String, key: &str, text: &RichText, depth: usize) {
    let tag = text.title_tag.map(|t| t.as_str());
    line(out, depth, format!("[rich_text] {} {}", key, heading(&text.title, tag)));
    // Pre-rendered HTML takes precedence over the JSON document.
    if let Some(html) = &text.alternative_content {
        line(out, depth + 1, format!("html: {} bytes", html.len()));
    } else if text.content.is_some() {
        line(out, depth + 1, "json-rte document");
    }
    if let Some(cta) = &text.ctas {
        render_cta(out, cta, depth + 1);
    }
}

fn render_two_column(out: &mut String, key: &str, columns: &TwoColumn, depth: usize) {
    line(out, depth, format!("[two_column] {}", key));
    let media_key = format!("{}.media", key);
    let text_key = format!("{}.rich_text", key);
    let media = columns.media.clone().unwrap_or_default();
    let text = columns.rich_text.clone().unwrap_or_default();
    if columns.media_first {
        render_media(out, &media_key, &media, depth + 1);
        render_rich_text(out, &text_key, &text, depth + 1);
    } else {
        render_rich_text(out, &text_key, &text, depth + 1);
        render_media(out, &media_key, &media, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::map_blocks;
    use serde_json::json;

    #[test]
    fn test_unknown_block_prints_props() {
        let blocks = map_blocks(&[json!({"carousel": {"slides": 3}})]);
        let outline = render_outline(&blocks);
        assert!(outline.starts_with("No component found for: carousel\n"));
        assert!(outline.contains("\"slides\": 3"));
    }

    #[test]
    fn test_two_column_respects_media_first() {
        let blocks = map_blocks(&[
            json!({"two_column": {"media_first": true, "rich_text": {"title": "Craft"}}}),
            json!({"two_column": {"media_first": false}}),
        ]);
        let outline = render_outline(&blocks);
        let lines: Vec<&str> = outline.lines().collect();
        assert!(lines[1].trim_start().starts_with("[media]"));
        assert!(lines[2].trim_start().starts_with("[rich_text]"));
        assert!(lines[4].trim_start().starts_with("[rich_text]"));
        assert!(lines[5].trim_start().starts_with("[media]"));
        assert!(lines[1].contains("700x700"));
    }

    #[test]
    fn test_hero_outline() {
        let blocks = map_blocks(&[json!({"hero": {
            "title": "Digital Dawn",
            "title_tag": "h1",
            "ctas": [{"cta": {"text": "Shop", "link": {"title": "Shop", "href": "/products"}}}]
        }})]);
        let outline = render_outline(&blocks);
        assert!(outline.contains("[hero] component--0 Digital Dawn <h1>"));
        assert!(outline.contains("cta: Shop -> /products"));
    }
}
