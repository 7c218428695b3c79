//! Pre-indexed facet counting.
//!
//! Candidates are indexed once by `(category key, term uid)` into posting
//! lists of candidate positions. Counting a term then becomes a bitmap
//! intersection instead of a scan over every item's assignments. Results are
//! identical to [`compute_facets`](crate::engine::compute_facets).

use std::collections::HashMap;

use roaring::RoaringBitmap;
use vitrine_ids::{CategoryKey, TermUid};

use crate::catalog::Item;
use crate::engine::{annotate, constraints_excluding, Facet};
use crate::error::FacetError;
use crate::selection::Selection;
use crate::vocabulary::FacetVocabulary;

#[derive(Debug, Clone, Default)]
pub struct FacetIndex {
    postings: HashMap<CategoryKey, HashMap<TermUid, RoaringBitmap>>,
    len: u32,
}

impl FacetIndex {
    pub fn build(candidates: &[Item]) -> Result<Self, FacetError> {
        let len = u32::try_from(candidates.len())
            .map_err(|_| FacetError::CatalogTooLarge(candidates.len()))?;

        let mut postings: HashMap<CategoryKey, HashMap<TermUid, RoaringBitmap>> = HashMap::new();
        for (pos, item) in (0..len).zip(candidates) {
            for tag in &item.taxonomies {
                if tag.taxonomy_uid.is_empty() || tag.term_uid.is_empty() {
                    continue;
                }
                postings
                    .entry(tag.taxonomy_uid.clone())
                    .or_default()
                    .entry(tag.term_uid.clone())
                    .or_default()
                    .insert(pos);
            }
        }

        tracing::debug!(candidates = len, categories = postings.len(), "Built facet index");
        Ok(Self { postings, len })
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn posting(&self, key: &str, term: &str) -> Option<&RoaringBitmap> {
        self.postings.get(key).and_then(|terms| terms.get(term))
    }

    /// Items carrying at least one of `terms` under `key`.
    fn any_of<'a>(&self, key: &str, terms: impl IntoIterator<Item = &'a TermUid>) -> RoaringBitmap {
        let mut union = RoaringBitmap::new();
        for term in terms {
            if let Some(posting) = self.posting(key, term.as_str()) {
                union |= posting;
            }
        }
        union
    }

    fn all_items(&self) -> RoaringBitmap {
        let mut all = RoaringBitmap::new();
        all.insert_range(0..self.len);
        all
    }

    pub fn compute(&self, selection: &Selection, vocabulary: &FacetVocabulary) -> Vec<Facet> {
        vocabulary
            .categories()
            .iter()
            .map(|category| {
                let mut eligible = self.all_items();
                for (key, terms) in constraints_excluding(selection, vocabulary, &category.name) {
                    eligible &= self.any_of(key.as_str(), terms);
                }

                annotate(category, selection, |term| {
                    self.posting(category.key.as_str(), term.as_str())
                        .map(|posting| posting.intersection_len(&eligible) as usize)
                        .unwrap_or(0)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TagAssignment;
    use crate::engine::compute_facets;

    #[test]
    fn test_matches_scan_on_small_catalog() {
        let vocab = FacetVocabulary::builtin();
        let tag = |k: &str, t: &str| TagAssignment::new(k.parse().unwrap(), t.parse().unwrap());
        let candidates = vec![
            Item::new(
                "1".parse().unwrap(),
                vec![tag("materials", "gold"), tag("product_type", "ring")],
            ),
            Item::new(
                "2".parse().unwrap(),
                vec![
                    tag("materials", "silver"),
                    tag("materials", "diamond"),
                    tag("product_type", "ring"),
                    tag("product_line", "urban_armor"),
                ],
            ),
            Item::new("3".parse().unwrap(), vec![]),
        ];
        let index = FacetIndex::build(&candidates).unwrap();
        assert_eq!(index.len(), 3);

        let mut selection = Selection::new();
        selection.set_term("Materials", &"diamond".parse().unwrap(), true);
        selection.set_term("Product Line", &"urban_armor".parse().unwrap(), true);

        assert_eq!(
            index.compute(&selection, &vocab),
            compute_facets(&candidates, &selection, &vocab)
        );
    }

    #[test]
    fn test_empty_index() {
        let vocab = FacetVocabulary::builtin();
        let index = FacetIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        let facets = index.compute(&Selection::new(), &vocab);
        assert!(facets.iter().flat_map(|f| &f.terms).all(|t| t.count == 0 && t.disabled));
    }
}
