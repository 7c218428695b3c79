//! Static facet vocabulary.
//!
//! The vocabulary is configuration, not data: a fixed, ordered list of
//! categories, each mapped to exactly one category key and owning an ordered
//! list of terms. It is loaded once at start and shared behind an `Arc`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vitrine_ids::{CategoryKey, TermUid};

use crate::error::VocabularyError;

/// One selectable term of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetTermDef {
    pub uid: TermUid,
    pub name: String,
}

/// A display category and the key its tag assignments carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCategoryDef {
    pub name: String,
    pub key: CategoryKey,
    #[serde(default)]
    pub terms: Vec<FacetTermDef>,
}

impl FacetCategoryDef {
    pub fn has_term(&self, uid: &str) -> bool {
        self.terms.iter().any(|t| t.uid.as_str() == uid)
    }
}

/// Validated, ordered facet vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetVocabulary {
    categories: Vec<FacetCategoryDef>,
}

#[derive(Deserialize)]
struct VocabularyFile {
    #[serde(default, rename = "category")]
    categories: Vec<FacetCategoryDef>,
}

impl FacetVocabulary {
    pub fn new(categories: Vec<FacetCategoryDef>) -> Result<Self, VocabularyError> {
        if categories.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        for (pos, category) in categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(VocabularyError::EmptyName(pos));
            }
            CategoryKey::parse(category.key.as_str()).map_err(|e| VocabularyError::InvalidId {
                category: category.name.clone(),
                reason: e.to_string(),
            })?;
            if !names.insert(category.name.as_str()) {
                return Err(VocabularyError::DuplicateName(category.name.clone()));
            }
            if !keys.insert(category.key.as_str()) {
                return Err(VocabularyError::DuplicateKey(category.key.to_string()));
            }

            let mut terms = HashSet::new();
            for term in &category.terms {
                TermUid::parse(term.uid.as_str()).map_err(|e| VocabularyError::InvalidId {
                    category: category.name.clone(),
                    reason: e.to_string(),
                })?;
                if !terms.insert(term.uid.as_str()) {
                    return Err(VocabularyError::DuplicateTerm {
                        category: category.name.clone(),
                        term: term.uid.to_string(),
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    /// Parse a vocabulary from TOML (`[[category]]` tables).
    pub fn from_toml_str(raw: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = toml::from_str(raw)?;
        Self::new(file.categories)
    }

    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::from_toml_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            categories = vocabulary.categories.len(),
            "Loaded facet vocabulary"
        );
        Ok(vocabulary)
    }

    pub fn categories(&self) -> &[FacetCategoryDef] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&FacetCategoryDef> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Display name to category key lookup.
    pub fn key_for(&self, name: &str) -> Option<&CategoryKey> {
        self.category(name).map(|c| &c.key)
    }

    /// The jewelry vocabulary the storefront ships with.
    pub fn builtin() -> Self {
        fn category(name: &str, key: &str, terms: &[(&str, &str)]) -> FacetCategoryDef {
            FacetCategoryDef {
                name: name.to_string(),
                key: CategoryKey::parse(key).unwrap_or_default(),
                terms: terms
                    .iter()
                    .map(|(uid, name)| FacetTermDef {
                        uid: TermUid::parse(uid).unwrap_or_default(),
                        name: name.to_string(),
                    })
                    .collect(),
            }
        }

        Self {
            categories: vec![
                category(
                    "Materials",
                    "materials",
                    &[
                        ("white_gold", "White Gold"),
                        ("gold", "Gold"),
                        ("silver", "Silver"),
                        ("diamond", "Diamond"),
                    ],
                ),
                category(
                    "Product Type",
                    "product_type",
                    &[
                        ("necklace", "Necklace"),
                        ("earring", "Earring"),
                        ("bracelet", "Bracelet"),
                        ("ring", "Ring"),
                    ],
                ),
                category(
                    "Product Line",
                    "product_line",
                    &[
                        ("digital_dawn", "Digital Dawn"),
                        ("charmed_revival", "Charmed Revival"),
                        ("urban_armor", "Urban Armor"),
                        ("elegant_rebellion", "Elegant Rebellion"),
                    ],
                ),
            ],
        }
    }
}

impl Default for FacetVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
