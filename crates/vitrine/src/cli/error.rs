//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

use vitrine_facets::FacetVocabulary;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions
            .extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                format!(
                    "TRY: Look for similar files: ls {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| ".".to_string())
                ),
            ])
    }

    pub fn catalog_unreadable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot load catalog: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: The catalog must be a JSON array of products".to_string(),
                "TRY: Each product needs a uid and a taxonomies array of {taxonomy_uid, term_uid}"
                    .to_string(),
            ])
    }

    pub fn vocabulary_unreadable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot load vocabulary: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Each [[category]] needs a unique name, a unique key and terms".to_string(),
                "TRY: Remove --vocabulary to use the built-in vocabulary".to_string(),
            ])
    }

    pub fn invalid_selection(raw: &str, reason: &str) -> Self {
        Self::new(format!("Invalid selection: '{}'", raw))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Use the form Name=uid[,uid], e.g. --select Materials=gold,silver",
                "TRY: Quote category names with spaces: --select \"Product Type=ring\"",
            ])
    }

    pub fn unknown_category(name: &str, vocabulary: &FacetVocabulary) -> Self {
        let known: Vec<&str> = vocabulary
            .categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        Self::new(format!("Unknown facet category: '{}'", name))
            .with_context("Category names are matched exactly, including case")
            .with_suggestion(format!("TRY: Known categories: {}", known.join(", ")))
    }

    pub fn unknown_term(category: &str, term: &str, vocabulary: &FacetVocabulary) -> Self {
        let known: Vec<&str> = vocabulary
            .category(category)
            .map(|c| c.terms.iter().map(|t| t.uid.as_str()).collect())
            .unwrap_or_default();
        Self::new(format!("Unknown term '{}' in category '{}'", term, category))
            .with_context("Terms are selected by uid, not by display name")
            .with_suggestion(format!("TRY: Terms in {}: {}", category, known.join(", ")))
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While loading the catalog")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While loading the catalog"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_file_not_found() {
        let err = HelpfulError::file_not_found(&PathBuf::from("/nonexistent/catalog.json"));
        let display = format!("{}", err);
        assert!(display.contains("/nonexistent/catalog.json"));
        assert!(display.contains("TRY:"));
    }

    #[test]
    fn test_unknown_category_lists_known_names() {
        let vocabulary = FacetVocabulary::builtin();
        let display = format!("{}", HelpfulError::unknown_category("Metal", &vocabulary));
        assert!(display.contains("'Metal'"));
        assert!(display.contains("Materials, Product Type, Product Line"));
    }

    #[test]
    fn test_unknown_term_lists_category_terms() {
        let vocabulary = FacetVocabulary::builtin();
        let display = format!(
            "{}",
            HelpfulError::unknown_term("Materials", "platinum", &vocabulary)
        );
        assert!(display.contains("'platinum'"));
        assert!(display.contains("gold"));
    }
}
