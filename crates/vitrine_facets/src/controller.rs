//! Filter controller: selection state, facet recomputation and page
//! request sequencing.
//!
//! Every selection change recomputes facets synchronously and issues a
//! numbered [`PageRequest`]. Page results are applied only when they answer
//! the most recently issued request; anything older is discarded.

use std::sync::Arc;

use serde::Serialize;
use vitrine_ids::TermUid;

use crate::catalog::Item;
use crate::engine::Facet;
use crate::error::{FacetError, PageSourceError};
use crate::index::FacetIndex;
use crate::selection::Selection;
use crate::source::{ItemPage, PageOptions, PageQuery};
use crate::vocabulary::FacetVocabulary;

/// Monotonic request sequence number.
pub type RequestSeq = u64;

/// A page fetch the caller must perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: RequestSeq,
    pub query: PageQuery,
}

/// What happened to a page result handed to [`FilterController::apply_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Applied,
    /// A newer request was issued after this one.
    Stale { seq: RequestSeq, latest: RequestSeq },
    /// The latest request failed; the previous page stays displayed.
    Failed(PageSourceError),
}

/// Point-in-time view of the controller, as published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSnapshot {
    pub selection: Selection,
    pub facets: Vec<Facet>,
    pub page: ItemPage,
    pub loading: bool,
    pub last_error: Option<String>,
    pub issued: RequestSeq,
    pub applied: RequestSeq,
}

pub struct FilterController {
    vocabulary: Arc<FacetVocabulary>,
    index: FacetIndex,
    selection: Selection,
    facets: Vec<Facet>,
    page: ItemPage,
    options: PageOptions,
    last_error: Option<String>,
    issued: RequestSeq,
    applied: RequestSeq,
}

impl FilterController {
    /// Build a controller over the full candidate set. `initial_page` is the
    /// unfiltered page already on display.
    pub fn new(
        vocabulary: Arc<FacetVocabulary>,
        candidates: &[Item],
        initial_page: ItemPage,
    ) -> Result<Self, FacetError> {
        let index = FacetIndex::build(candidates)?;
        let selection = Selection::new();
        let facets = index.compute(&selection, &vocabulary);
        Ok(Self {
            vocabulary,
            index,
            selection,
            facets,
            page: initial_page,
            options: PageOptions::default(),
            last_error: None,
            issued: 0,
            applied: 0,
        })
    }

    pub fn with_page_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn vocabulary(&self) -> &FacetVocabulary {
        &self.vocabulary
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn page(&self) -> &ItemPage {
        &self.page
    }

    pub fn page_options(&self) -> PageOptions {
        self.options
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.issued
    }

    /// The latest issued request has not been answered yet.
    pub fn is_loading(&self) -> bool {
        self.applied < self.issued
    }

    pub fn candidate_count(&self) -> usize {
        self.index.len()
    }

    /// Select or deselect `term` in `category`.
    ///
    /// Returns the page request to run, or `None` when the selection did not
    /// change.
    pub fn set_term(
        &mut self,
        category: &str,
        term: &TermUid,
        selected: bool,
    ) -> Option<PageRequest> {
        if !self.selection.set_term(category, term, selected) {
            return None;
        }
        tracing::debug!(category, term = %term, selected, "Selection changed");
        Some(self.selection_changed())
    }

    /// Drop every selection, as on navigation.
    pub fn reset(&mut self) -> Option<PageRequest> {
        if !self.selection.clear() {
            return None;
        }
        Some(self.selection_changed())
    }

    /// Change paging or ordering and refetch with the current selection.
    pub fn set_page_options(&mut self, options: PageOptions) -> PageRequest {
        self.options = options;
        self.issue()
    }

    /// The query matching the current selection and options.
    pub fn current_query(&self) -> PageQuery {
        PageQuery {
            taxonomies: self.selection.to_taxonomy_filters(&self.vocabulary),
            options: self.options,
        }
    }

    fn selection_changed(&mut self) -> PageRequest {
        self.facets = self.index.compute(&self.selection, &self.vocabulary);
        self.issue()
    }

    fn issue(&mut self) -> PageRequest {
        self.issued += 1;
        PageRequest {
            seq: self.issued,
            query: self.current_query(),
        }
    }

    /// Hand back the result of a page fetch. Only the latest request wins.
    pub fn apply_page(
        &mut self,
        seq: RequestSeq,
        result: Result<ItemPage, PageSourceError>,
    ) -> PageOutcome {
        if seq != self.issued {
            tracing::debug!(seq, latest = self.issued, "Discarding stale page result");
            return PageOutcome::Stale {
                seq,
                latest: self.issued,
            };
        }

        self.applied = seq;
        match result {
            Ok(page) => {
                tracing::debug!(seq, items = page.items.len(), total = page.total_count, "Applied page");
                self.page = page;
                self.last_error = None;
                PageOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(seq, error = %err, "Page fetch failed; keeping previous page");
                self.last_error = Some(err.to_string());
                PageOutcome::Failed(err)
            }
        }
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            selection: self.selection.clone(),
            facets: self.facets.clone(),
            page: self.page.clone(),
            loading: self.is_loading(),
            last_error: self.last_error.clone(),
            issued: self.issued,
            applied: self.applied,
        }
    }
}
