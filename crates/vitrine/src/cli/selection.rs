//! `--select` arguments and catalog loading shared by `facets` and `browse`.

use anyhow::Result;
use std::path::Path;
use vitrine_facets::{load_catalog, CatalogError, FacetVocabulary, Product, Selection, TermUid};

use crate::cli::error::HelpfulError;

/// Parse every `Name=uid[,uid]` argument, checking names and terms against
/// the vocabulary. Returns the (category, term) pairs in argument order.
pub fn parse_selects(
    raw: &[String],
    vocabulary: &FacetVocabulary,
) -> Result<Vec<(String, TermUid)>> {
    let mut picks = Vec::new();
    for arg in raw {
        let (name, terms) = Selection::parse_assignment(arg)
            .map_err(|reason| HelpfulError::invalid_selection(arg, &reason))?;
        let Some(category) = vocabulary.category(&name) else {
            return Err(HelpfulError::unknown_category(&name, vocabulary).into());
        };
        for term in terms {
            if !category.has_term(term.as_str()) {
                return Err(HelpfulError::unknown_term(&name, term.as_str(), vocabulary).into());
            }
            picks.push((name.clone(), term));
        }
    }
    Ok(picks)
}

pub fn selection_from(picks: &[(String, TermUid)]) -> Selection {
    let mut selection = Selection::new();
    for (category, term) in picks {
        selection.set_term(category, term, true);
    }
    selection
}

pub fn read_catalog(path: &Path) -> Result<Vec<Product>> {
    if !path.exists() {
        return Err(HelpfulError::file_not_found(path).into());
    }
    load_catalog(path).map_err(|err| {
        let reason = match &err {
            CatalogError::Read { source, .. } => source.to_string(),
            CatalogError::Parse { source, .. } => source.to_string(),
        };
        HelpfulError::catalog_unreadable(path, &reason).into()
    })
}
