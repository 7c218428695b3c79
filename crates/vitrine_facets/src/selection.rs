//! Selected terms per facet category.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use vitrine_ids::{CategoryKey, TermUid};

use crate::vocabulary::FacetVocabulary;

/// Category display name to selected term uids.
///
/// A category with no selected terms is absent from the map; there is never
/// an empty set stored under a key, including after deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, BTreeSet<TermUid>>")]
#[serde(into = "BTreeMap<String, BTreeSet<TermUid>>")]
pub struct Selection {
    terms: BTreeMap<String, BTreeSet<TermUid>>,
}

impl From<BTreeMap<String, BTreeSet<TermUid>>> for Selection {
    fn from(mut terms: BTreeMap<String, BTreeSet<TermUid>>) -> Self {
        terms.retain(|_, set| !set.is_empty());
        Self { terms }
    }
}

impl From<Selection> for BTreeMap<String, BTreeSet<TermUid>> {
    fn from(selection: Selection) -> Self {
        selection.terms
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `term` under `category`. Returns whether anything changed.
    pub fn set_term(&mut self, category: &str, term: &TermUid, selected: bool) -> bool {
        if selected {
            return self
                .terms
                .entry(category.to_string())
                .or_default()
                .insert(term.clone());
        }

        let Some(set) = self.terms.get_mut(category) else {
            return false;
        };
        let removed = set.remove(term);
        if set.is_empty() {
            self.terms.remove(category);
        }
        removed
    }

    pub fn toggle(&mut self, category: &str, term: &TermUid) -> bool {
        let selected = self.is_selected(category, term.as_str());
        self.set_term(category, term, !selected);
        !selected
    }

    pub fn is_selected(&self, category: &str, term: &str) -> bool {
        self.terms
            .get(category)
            .map(|set| set.contains(term))
            .unwrap_or(false)
    }

    pub fn terms(&self, category: &str) -> Option<&BTreeSet<TermUid>> {
        self.terms.get(category)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.terms.contains_key(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<TermUid>)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) -> bool {
        let had = !self.terms.is_empty();
        self.terms.clear();
        had
    }

    /// Translate display names to category keys for a page query.
    ///
    /// Categories the vocabulary does not know, and empty ones, are dropped.
    pub fn to_taxonomy_filters(
        &self,
        vocabulary: &FacetVocabulary,
    ) -> BTreeMap<CategoryKey, Vec<TermUid>> {
        self.terms
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .filter_map(|(name, set)| match vocabulary.key_for(name) {
                Some(key) => Some((key.clone(), set.iter().cloned().collect())),
                None => {
                    tracing::warn!(category = %name, "Ignoring selection for unknown facet category");
                    None
                }
            })
            .collect()
    }

    /// Parse `Name=uid[,uid...]`, as accepted on the command line.
    pub fn parse_assignment(raw: &str) -> Result<(String, Vec<TermUid>), String> {
        let (name, terms) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected Name=term[,term], got '{}'", raw))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing category name in '{}'", raw));
        }
        let terms = terms
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<TermUid>().map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        if terms.is_empty() {
            return Err(format!("no terms given for '{}'", name));
        }
        Ok((name.to_string(), terms))
    }
}
