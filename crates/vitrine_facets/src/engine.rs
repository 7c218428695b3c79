//! Facet counts over the full candidate set.
//!
//! For a term T of category C, an item counts when it carries `(C.key, T)`
//! and, for every *other* category with a non-empty selection, carries at
//! least one selected term of that category. Categories are ANDed, terms
//! within a category are ORed, and C never filters itself.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use vitrine_ids::{CategoryKey, TermUid};

use crate::catalog::Item;
use crate::selection::Selection;
use crate::vocabulary::{FacetCategoryDef, FacetVocabulary};

/// A facet term annotated with its live count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetTerm {
    pub uid: TermUid,
    pub name: String,
    pub count: usize,
    pub disabled: bool,
}

/// One facet category with annotated terms, in vocabulary order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub key: CategoryKey,
    pub terms: Vec<FacetTerm>,
}

impl Facet {
    pub fn term(&self, uid: &str) -> Option<&FacetTerm> {
        self.terms.iter().find(|t| t.uid.as_str() == uid)
    }
}

/// Find a facet by display name.
pub fn facet<'a>(facets: &'a [Facet], name: &str) -> Option<&'a Facet> {
    facets.iter().find(|f| f.name == name)
}

/// Selections of every category except `exclude`, resolved to keys.
///
/// Selection entries for categories outside the vocabulary are skipped.
pub(crate) fn constraints_excluding<'a>(
    selection: &'a Selection,
    vocabulary: &'a FacetVocabulary,
    exclude: &str,
) -> Vec<(&'a CategoryKey, &'a BTreeSet<TermUid>)> {
    selection
        .iter()
        .filter(|(name, terms)| *name != exclude && !terms.is_empty())
        .filter_map(|(name, terms)| vocabulary.key_for(name).map(|key| (key, terms)))
        .collect()
}

pub(crate) fn annotate(
    category: &FacetCategoryDef,
    selection: &Selection,
    mut count_for: impl FnMut(&TermUid) -> usize,
) -> Facet {
    let terms = category
        .terms
        .iter()
        .map(|term| {
            let count = count_for(&term.uid);
            let selected = selection.is_selected(&category.name, term.uid.as_str());
            FacetTerm {
                uid: term.uid.clone(),
                name: term.name.clone(),
                count,
                disabled: count == 0 && !selected,
            }
        })
        .collect();

    Facet {
        name: category.name.clone(),
        key: category.key.clone(),
        terms,
    }
}

/// Compute every facet by scanning the candidates.
pub fn compute_facets(
    candidates: &[Item],
    selection: &Selection,
    vocabulary: &FacetVocabulary,
) -> Vec<Facet> {
    vocabulary
        .categories()
        .iter()
        .map(|category| {
            let others = constraints_excluding(selection, vocabulary, &category.name);
            let eligible: Vec<&Item> = candidates
                .iter()
                .filter(|item| {
                    others
                        .iter()
                        .all(|(key, terms)| item.has_any(key.as_str(), *terms))
                })
                .collect();

            annotate(category, selection, |term| {
                eligible
                    .iter()
                    .filter(|item| item.has_tag(category.key.as_str(), term.as_str()))
                    .count()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TagAssignment;

    fn item(uid: &str, tags: &[(&str, &str)]) -> Item {
        Item::new(
            uid.parse().unwrap(),
            tags.iter()
                .map(|(k, t)| TagAssignment::new(k.parse().unwrap(), t.parse().unwrap()))
                .collect(),
        )
    }

    fn select(pairs: &[(&str, &str)]) -> Selection {
        let mut selection = Selection::new();
        for (category, term) in pairs {
            selection.set_term(category, &term.parse().unwrap(), true);
        }
        selection
    }

    fn count(facets: &[Facet], category: &str, term: &str) -> (usize, bool) {
        let t = facet(facets, category).unwrap().term(term).unwrap();
        (t.count, t.disabled)
    }

    fn two_rings() -> Vec<Item> {
        vec![
            item("1", &[("materials", "gold"), ("product_type", "ring")]),
            item("2", &[("materials", "silver"), ("product_type", "ring")]),
        ]
    }

    #[test]
    fn test_ring_selected_scenario() {
        let vocab = FacetVocabulary::builtin();
        let facets = compute_facets(&two_rings(), &select(&[("Product Type", "ring")]), &vocab);

        assert_eq!(count(&facets, "Materials", "gold"), (1, false));
        assert_eq!(count(&facets, "Materials", "silver"), (1, false));
        assert_eq!(count(&facets, "Product Type", "ring"), (2, false));
        for other in ["necklace", "earring", "bracelet"] {
            assert_eq!(count(&facets, "Product Type", other), (0, true));
        }
    }

    #[test]
    fn test_gold_selected_scenario() {
        let vocab = FacetVocabulary::builtin();
        let facets = compute_facets(&two_rings(), &select(&[("Materials", "gold")]), &vocab);
        assert_eq!(count(&facets, "Product Type", "ring"), (1, false));
        // Materials is not filtered by its own selection.
        assert_eq!(count(&facets, "Materials", "silver"), (1, false));
    }

    #[test]
    fn test_output_follows_vocabulary_order() {
        let vocab = FacetVocabulary::builtin();
        let facets = compute_facets(&[], &Selection::new(), &vocab);
        let names: Vec<_> = facets.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Materials", "Product Type", "Product Line"]);
        let terms: Vec<_> = facets[0].terms.iter().map(|t| t.uid.as_str()).collect();
        assert_eq!(terms, ["white_gold", "gold", "silver", "diamond"]);
        assert!(facets.iter().flat_map(|f| &f.terms).all(|t| t.disabled));
    }

    #[test]
    fn test_selected_zero_count_term_stays_enabled() {
        let vocab = FacetVocabulary::builtin();
        let candidates = vec![
            item("1", &[("materials", "gold"), ("product_type", "ring")]),
            item("2", &[("materials", "silver"), ("product_type", "necklace")]),
        ];
        let selection = select(&[("Materials", "gold"), ("Product Type", "necklace")]);
        let facets = compute_facets(&candidates, &selection, &vocab);

        // No necklace is gold, so gold counts zero but is selected.
        assert_eq!(count(&facets, "Materials", "gold"), (0, false));
        assert_eq!(count(&facets, "Product Type", "necklace"), (0, false));
        assert_eq!(count(&facets, "Product Type", "ring"), (1, false));
        assert_eq!(count(&facets, "Materials", "diamond"), (0, true));
    }

    #[test]
    fn test_intra_category_or() {
        let vocab = FacetVocabulary::builtin();
        let candidates = vec![
            item("1", &[("materials", "gold"), ("product_type", "ring")]),
            item("2", &[("materials", "silver"), ("product_type", "ring")]),
            item("3", &[("materials", "diamond"), ("product_type", "ring")]),
        ];
        let selection = select(&[("Materials", "gold"), ("Materials", "silver")]);
        let facets = compute_facets(&candidates, &selection, &vocab);
        assert_eq!(count(&facets, "Product Type", "ring"), (2, false));
    }

    #[test]
    fn test_untagged_items_count_nowhere() {
        let vocab = FacetVocabulary::builtin();
        let candidates = vec![item("1", &[]), item("2", &[("materials", "gold")])];
        let facets = compute_facets(&candidates, &Selection::new(), &vocab);
        let total: usize = facets.iter().flat_map(|f| &f.terms).map(|t| t.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_repeated_assignment_counts_once() {
        let vocab = FacetVocabulary::builtin();
        let candidates = vec![item("1", &[("materials", "gold"), ("materials", "gold")])];
        let facets = compute_facets(&candidates, &Selection::new(), &vocab);
        assert_eq!(count(&facets, "Materials", "gold"), (1, false));
    }

    #[test]
    fn test_unknown_selection_category_is_ignored() {
        let vocab = FacetVocabulary::builtin();
        let facets = compute_facets(&two_rings(), &select(&[("Colour", "red")]), &vocab);
        assert_eq!(count(&facets, "Product Type", "ring"), (2, false));
    }

    #[test]
    fn test_unknown_selected_term_matches_nothing() {
        let vocab = FacetVocabulary::builtin();
        let facets = compute_facets(&two_rings(), &select(&[("Materials", "platinum")]), &vocab);
        assert_eq!(count(&facets, "Product Type", "ring"), (0, true));
        assert_eq!(count(&facets, "Materials", "gold"), (1, false));
    }
}
