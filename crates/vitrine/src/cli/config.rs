//! Configuration for the Vitrine CLI
//!
//! Optional settings live in `~/.vitrine/config.toml`; command-line flags
//! override them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vitrine_facets::FacetVocabulary;
use vitrine_logging::{logs_dir, vitrine_home, DEFAULT_LOG_FILTER};

use crate::cli::error::HelpfulError;

/// Page size used when neither the flag nor the config sets one.
pub const DEFAULT_PAGE_LIMIT: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VitrineConfig {
    /// Vocabulary TOML used when `--vocabulary` is not given.
    #[serde(default)]
    pub vocabulary: Option<PathBuf>,
    #[serde(default)]
    pub page_limit: Option<usize>,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,
}

pub fn config_path() -> PathBuf {
    vitrine_home().join("config.toml")
}

impl VitrineConfig {
    /// Load the config file if present; a missing file is the default config.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        // Relative vocabulary paths are relative to the config file.
        if let (Some(vocabulary), Some(dir)) = (&config.vocabulary, path.parent()) {
            if vocabulary.is_relative() {
                config.vocabulary = Some(dir.join(vocabulary));
            }
        }
        Ok(config)
    }

    pub fn page_limit(&self, flag: Option<usize>) -> usize {
        flag.or(self.page_limit).unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    /// The vocabulary for this run: the flag, then the config file, then the
    /// built-in one.
    pub fn resolve_vocabulary(&self, flag: Option<&Path>) -> Result<Arc<FacetVocabulary>> {
        let Some(path) = flag.or(self.vocabulary.as_deref()) else {
            return Ok(Arc::new(FacetVocabulary::builtin()));
        };
        if !path.exists() {
            return Err(HelpfulError::file_not_found(path).into());
        }
        let vocabulary = FacetVocabulary::load(path)
            .map_err(|err| HelpfulError::vocabulary_unreadable(path, &err.to_string()))?;
        Ok(Arc::new(vocabulary))
    }
}

pub struct ConfigArgs {
    pub json: bool,
}

pub fn run(args: ConfigArgs, config: &VitrineConfig) -> Result<()> {
    let config_file = config_path();
    let vocabulary = config
        .vocabulary
        .as_ref()
        .map(|p| p.display().to_string());
    let log_filter = config.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);

    if args.json {
        let output = serde_json::json!({
            "home": vitrine_home().display().to_string(),
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "logs_dir": logs_dir().display().to_string(),
            "vocabulary": vocabulary,
            "page_limit": config.page_limit(None),
            "log_filter": log_filter,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Vitrine configuration");
    println!();
    println!("  Home:        {}", vitrine_home().display());
    println!(
        "  Config:      {}{}",
        config_file.display(),
        if config_file.exists() { "" } else { " (not present)" }
    );
    println!("  Logs:        {}", logs_dir().display());
    println!(
        "  Vocabulary:  {}",
        vocabulary.as_deref().unwrap_or("(built-in)")
    );
    println!("  Page limit:  {}", config.page_limit(None));
    println!("  Log filter:  {}", log_filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = VitrineConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, VitrineConfig::default());
        assert_eq!(config.page_limit(None), DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_config_values_and_flag_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "vocabulary = \"vocab.toml\"\npage_limit = 12\nlog_filter = \"vitrine=debug\"\n",
        )
        .unwrap();

        let config = VitrineConfig::load_from(&path).unwrap();
        assert_eq!(config.vocabulary, Some(dir.path().join("vocab.toml")));
        assert_eq!(config.page_limit(None), 12);
        assert_eq!(config.page_limit(Some(3)), 3);
        assert_eq!(config.log_filter.as_deref(), Some("vitrine=debug"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 12\n").unwrap();
        assert!(VitrineConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_resolve_vocabulary_prefers_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.toml");
        std::fs::write(
            &path,
            "[[category]]\nname = \"Stones\"\nkey = \"stones\"\nterms = [{ uid = \"ruby\", name = \"Ruby\" }]\n",
        )
        .unwrap();

        let config = VitrineConfig::default();
        assert_eq!(
            *config.resolve_vocabulary(None).unwrap(),
            FacetVocabulary::builtin()
        );
        let loaded = config.resolve_vocabulary(Some(&path)).unwrap();
        assert_eq!(loaded.categories().len(), 1);
        assert_eq!(loaded.categories()[0].name, "Stones");

        let missing = config.resolve_vocabulary(Some(&dir.path().join("nope.toml")));
        assert!(missing.is_err());
    }
}
