//! `vitrine browse`: drive a filter session over a catalog.
//!
//! Each selected term is sent to the session as its own toggle, so every
//! step issues a page request and all but the last are superseded.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use vitrine_facets::{
    candidates, CatalogPageSource, FilterController, FilterSession, FilterSnapshot,
    OrderDirection, PageOptions, PageQuery, PageSource, ProductOrder,
};

use crate::cli::config::VitrineConfig;
use crate::cli::error::HelpfulError;
use crate::cli::output::{print_facets, print_page};
use crate::cli::selection::{parse_selects, read_catalog};

pub struct BrowseArgs {
    pub catalog: PathBuf,
    pub vocabulary: Option<PathBuf>,
    pub select: Vec<String>,
    pub limit: Option<usize>,
    pub skip: usize,
    pub order: ProductOrder,
    pub desc: bool,
    pub json: bool,
}

pub fn run(args: BrowseArgs, config: &VitrineConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let snapshot = runtime.block_on(browse(&args, config))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_facets(&snapshot.facets, &snapshot.selection);
    println!();
    print_page(&snapshot.page);
    Ok(())
}

async fn browse(args: &BrowseArgs, config: &VitrineConfig) -> Result<FilterSnapshot> {
    let vocabulary = config.resolve_vocabulary(args.vocabulary.as_deref())?;
    let picks = parse_selects(&args.select, &vocabulary)?;
    let products = read_catalog(&args.catalog)?;

    let options = PageOptions {
        limit: Some(config.page_limit(args.limit)),
        skip: args.skip,
        order: args.order,
        direction: if args.desc {
            OrderDirection::Desc
        } else {
            OrderDirection::Asc
        },
    };

    let source = Arc::new(CatalogPageSource::new(products));
    let initial = source
        .fetch_page(&PageQuery {
            options,
            ..PageQuery::default()
        })
        .await?;
    let controller = FilterController::new(
        vocabulary,
        &candidates(source.products()),
        initial,
    )?
    .with_page_options(options);
    info!(
        candidates = controller.candidate_count(),
        selects = picks.len(),
        "Starting filter session"
    );

    let session = FilterSession::spawn(controller, source);
    let handle = session.handle();
    for (category, term) in picks {
        handle.set_term(category, term, true).await?;
    }
    let snapshot = handle.wait_until_settled().await?;
    session.shutdown().await?;

    if let Some(error) = &snapshot.last_error {
        return Err(HelpfulError::new("Page fetch failed")
            .with_context(error.clone())
            .with_suggestion("TRY: Re-run with -v to see the fetch log")
            .into());
    }
    Ok(snapshot)
}
