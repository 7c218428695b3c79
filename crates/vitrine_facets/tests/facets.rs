//! Facet count properties over generated catalogs.

use proptest::prelude::*;
use vitrine_facets::{
    candidates, compute_facets, facet, CatalogPageSource, Facet, FacetIndex, FacetVocabulary,
    Item, PageQuery, Product, Selection, TagAssignment, TermUid,
};

fn tag(key: &str, term: &str) -> TagAssignment {
    TagAssignment::new(key.parse().unwrap(), term.parse().unwrap())
}

fn item(uid: &str, tags: Vec<TagAssignment>) -> Item {
    Item::new(uid.parse().unwrap(), tags)
}

fn term(uid: &str) -> TermUid {
    uid.parse().unwrap()
}

fn count_of(facets: &[Facet], category: &str, uid: &str) -> usize {
    facet(facets, category).unwrap().term(uid).unwrap().count
}

/// Every (category name, key, term) of the builtin vocabulary.
fn vocabulary_terms() -> Vec<(String, String, String)> {
    FacetVocabulary::builtin()
        .categories()
        .iter()
        .flat_map(|c| {
            c.terms
                .iter()
                .map(move |t| (c.name.clone(), c.key.to_string(), t.uid.to_string()))
        })
        .collect()
}

fn arb_item(pos: usize) -> impl Strategy<Value = Item> {
    let terms = vocabulary_terms();
    let n = terms.len();
    // Indices past the vocabulary produce off-vocabulary tags.
    prop::collection::vec(0..n + 2, 0..5).prop_map(move |picks| {
        let tags = picks
            .into_iter()
            .map(|i| match terms.get(i) {
                Some((_, key, uid)) => tag(key, uid),
                None => tag("materials", "platinum"),
            })
            .collect();
        item(&format!("item-{pos}"), tags)
    })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Item>> {
    (0usize..25).prop_flat_map(|len| (0..len).map(arb_item).collect::<Vec<_>>())
}

fn arb_selection() -> impl Strategy<Value = Selection> {
    let terms = vocabulary_terms();
    let n = terms.len();
    prop::collection::vec(0..n, 0..5).prop_map(move |picks| {
        let mut selection = Selection::new();
        for i in picks {
            let (name, _, uid) = &terms[i];
            selection.set_term(name, &term(uid), true);
        }
        selection
    })
}

#[test]
fn test_scenario_ring_selected() {
    let vocab = FacetVocabulary::builtin();
    let candidates = vec![
        item("1", vec![tag("materials", "gold"), tag("product_type", "ring")]),
        item("2", vec![tag("materials", "silver"), tag("product_type", "ring")]),
    ];
    let mut selection = Selection::new();
    selection.set_term("Product Type", &term("ring"), true);

    let facets = compute_facets(&candidates, &selection, &vocab);
    let materials = facet(&facets, "Materials").unwrap();
    assert_eq!(materials.term("gold").unwrap().count, 1);
    assert!(!materials.term("gold").unwrap().disabled);
    assert_eq!(materials.term("silver").unwrap().count, 1);
    assert!(!materials.term("silver").unwrap().disabled);

    let types = facet(&facets, "Product Type").unwrap();
    for t in &types.terms {
        if t.uid.as_str() == "ring" {
            assert_eq!((t.count, t.disabled), (2, false));
        } else {
            assert_eq!((t.count, t.disabled), (0, true));
        }
    }
}

#[test]
fn test_scenario_gold_selected() {
    let vocab = FacetVocabulary::builtin();
    let candidates = vec![
        item("1", vec![tag("materials", "gold"), tag("product_type", "ring")]),
        item("2", vec![tag("materials", "silver"), tag("product_type", "ring")]),
    ];
    let mut selection = Selection::new();
    selection.set_term("Materials", &term("gold"), true);

    let facets = compute_facets(&candidates, &selection, &vocab);
    assert_eq!(count_of(&facets, "Product Type", "ring"), 1);
}

#[test]
fn test_cross_category_and() {
    let vocab = FacetVocabulary::builtin();
    // No diamond item is an earring.
    let candidates = vec![
        item("1", vec![tag("materials", "diamond"), tag("product_type", "ring")]),
        item("2", vec![tag("materials", "gold"), tag("product_type", "earring")]),
    ];
    let mut selection = Selection::new();
    selection.set_term("Materials", &term("diamond"), true);

    let facets = compute_facets(&candidates, &selection, &vocab);
    assert_eq!(count_of(&facets, "Product Type", "earring"), 0);
    assert_eq!(count_of(&facets, "Product Type", "ring"), 1);
}

#[test]
fn test_empty_category_in_stored_selection_filters_nothing() {
    let vocab = FacetVocabulary::builtin();
    let products: Vec<Product> = ["1", "2"]
        .iter()
        .map(|uid| Product {
            uid: uid.parse().unwrap(),
            title: format!("Gold {uid}"),
            taxonomies: vec![tag("materials", "gold")],
            ..Product::default()
        })
        .collect();
    let selection: Selection = serde_json::from_str(r#"{"Materials": []}"#).unwrap();
    assert!(selection.is_empty());

    let query = PageQuery {
        taxonomies: selection.to_taxonomy_filters(&vocab),
        ..PageQuery::default()
    };
    let page = CatalogPageSource::new(products.clone()).query(&query);
    assert_eq!(page.total_count, 2);

    let facets = compute_facets(&candidates(&products), &selection, &vocab);
    assert_eq!(count_of(&facets, "Materials", "gold"), page.total_count);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_index_matches_scan(candidates in arb_catalog(), selection in arb_selection()) {
        let vocab = FacetVocabulary::builtin();
        let index = FacetIndex::build(&candidates).unwrap();
        prop_assert_eq!(
            index.compute(&selection, &vocab),
            compute_facets(&candidates, &selection, &vocab)
        );
    }

    #[test]
    fn prop_empty_selection_counts_tag_holders(candidates in arb_catalog()) {
        let vocab = FacetVocabulary::builtin();
        let facets = compute_facets(&candidates, &Selection::new(), &vocab);
        for category in vocab.categories() {
            for def in &category.terms {
                let expected = candidates
                    .iter()
                    .filter(|i| i.has_tag(category.key.as_str(), def.uid.as_str()))
                    .count();
                let got = facet(&facets, &category.name).unwrap().term(def.uid.as_str()).unwrap();
                prop_assert_eq!(got.count, expected);
                prop_assert_eq!(got.disabled, expected == 0);
            }
        }
    }

    #[test]
    fn prop_own_selection_never_changes_sibling_counts(
        candidates in arb_catalog(),
        selection in arb_selection(),
        pick in 0usize..12,
    ) {
        let vocab = FacetVocabulary::builtin();
        let terms = vocabulary_terms();
        let (name, _, uid) = &terms[pick % terms.len()];

        let before = compute_facets(&candidates, &selection, &vocab);
        let mut toggled = selection.clone();
        toggled.toggle(name, &term(uid));
        let after = compute_facets(&candidates, &toggled, &vocab);

        let counts = |facets: &[Facet]| -> Vec<usize> {
            facet(facets, name).unwrap().terms.iter().map(|t| t.count).collect()
        };
        prop_assert_eq!(counts(&before), counts(&after));
    }

    #[test]
    fn prop_compute_is_idempotent(candidates in arb_catalog(), selection in arb_selection()) {
        let vocab = FacetVocabulary::builtin();
        let snapshot = (candidates.clone(), selection.clone());
        let first = compute_facets(&candidates, &selection, &vocab);
        let second = compute_facets(&candidates, &selection, &vocab);
        prop_assert_eq!(first, second);
        prop_assert_eq!(snapshot, (candidates, selection));
    }

    #[test]
    fn prop_disabled_iff_zero_and_unselected(candidates in arb_catalog(), selection in arb_selection()) {
        let vocab = FacetVocabulary::builtin();
        for f in compute_facets(&candidates, &selection, &vocab) {
            for t in &f.terms {
                let selected = selection.is_selected(&f.name, t.uid.as_str());
                prop_assert_eq!(t.disabled, t.count == 0 && !selected);
            }
        }
    }
}
