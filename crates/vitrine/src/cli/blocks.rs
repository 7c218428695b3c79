//! `vitrine blocks`: outline the modular blocks of a page document.

use anyhow::Result;
use std::path::PathBuf;
use vitrine_blocks::{parse_page, render_outline, ContentBlock};

use crate::cli::error::HelpfulError;
use crate::cli::output::print_table;

pub struct BlocksArgs {
    pub page: PathBuf,
    pub json: bool,
}

pub fn run(args: BlocksArgs) -> Result<()> {
    if !args.page.exists() {
        return Err(HelpfulError::file_not_found(&args.page).into());
    }
    let raw = std::fs::read_to_string(&args.page)?;
    let page = parse_page(&raw).map_err(|err| {
        HelpfulError::new(format!("Cannot parse page: {}", args.page.display()))
            .with_context(err.to_string())
            .with_suggestion("TRY: A page is a JSON object with an optional components array")
    })?;
    let blocks = page.blocks();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
        return Ok(());
    }

    println!(
        "{} ({} blocks)",
        if page.title.is_empty() { "(untitled page)" } else { page.title.as_str() },
        blocks.len()
    );
    println!();
    print!("{}", render_outline(&blocks));

    let flagged: Vec<Vec<String>> = blocks
        .iter()
        .filter_map(|placed| match &placed.block {
            ContentBlock::Invalid { block, reason, .. } => Some(vec![
                placed.key.clone(),
                block.to_string(),
                reason.clone(),
            ]),
            ContentBlock::Unknown { name, .. } => Some(vec![
                placed.key.clone(),
                name.clone(),
                "no component for this block".to_string(),
            ]),
            _ => None,
        })
        .collect();
    if !flagged.is_empty() {
        println!();
        print_table(&["KEY", "BLOCK", "PROBLEM"], flagged);
    }
    Ok(())
}
