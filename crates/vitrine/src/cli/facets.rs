//! `vitrine facets`: counts for a catalog under a selection.

use anyhow::Result;
use std::path::PathBuf;
use vitrine_facets::{candidates, FacetIndex};

use crate::cli::config::VitrineConfig;
use crate::cli::output::print_facets;
use crate::cli::selection::{parse_selects, read_catalog, selection_from};

pub struct FacetsArgs {
    pub catalog: PathBuf,
    pub vocabulary: Option<PathBuf>,
    pub select: Vec<String>,
    pub json: bool,
}

pub fn run(args: FacetsArgs, config: &VitrineConfig) -> Result<()> {
    let vocabulary = config.resolve_vocabulary(args.vocabulary.as_deref())?;
    let picks = parse_selects(&args.select, &vocabulary)?;
    let selection = selection_from(&picks);

    let products = read_catalog(&args.catalog)?;
    let index = FacetIndex::build(&candidates(&products))?;
    let facets = index.compute(&selection, &vocabulary);

    if args.json {
        let output = serde_json::json!({
            "candidates": index.len(),
            "selection": selection,
            "facets": facets,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_facets(&facets, &selection);
    println!("{} candidate products", index.len());
    Ok(())
}
