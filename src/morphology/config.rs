//! Configuration for loading tables and running the analyzer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::script::DEVANAGARI_WORD_PATTERN;
use crate::error::{Result, StemmaError};
use crate::morphology::rule_table::DEFAULT_PLACEHOLDER;

/// Locations of the three source tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSources {
    /// Root lexicon.
    pub roots: PathBuf,
    /// Suffix-to-rule index.
    pub suffixes: PathBuf,
    /// Transformation rule definitions.
    pub rules: PathBuf,
}

impl TableSources {
    pub fn new<R, S, T>(roots: R, suffixes: S, rules: T) -> Self
    where
        R: Into<PathBuf>,
        S: Into<PathBuf>,
        T: Into<PathBuf>,
    {
        TableSources {
            roots: roots.into(),
            suffixes: suffixes.into(),
            rules: rules.into(),
        }
    }

    /// The conventional file names (`root`, `suffix.txt`, `suffix_rule.txt`)
    /// inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        TableSources {
            roots: dir.join("root"),
            suffixes: dir.join("suffix.txt"),
            rules: dir.join("suffix_rule.txt"),
        }
    }
}

impl Default for TableSources {
    fn default() -> Self {
        Self::in_dir("files")
    }
}

/// Configuration for the morphological analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Where the tables are loaded from.
    pub tables: TableSources,

    /// Regex matching one word of the target script.
    pub script_pattern: String,

    /// Whether text analysis also tries strip-rule spelling fix-ups.
    pub rule_fixup: bool,

    /// Minimum number of words before text analysis fans out across threads.
    pub parallel_threshold: usize,

    /// Thread pool size for text analysis.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Character standing for an empty field in the rule table.
    pub placeholder: char,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            tables: TableSources::default(),
            script_pattern: DEVANAGARI_WORD_PATTERN.to_string(),
            rule_fixup: false,
            parallel_threshold: 256,
            thread_pool_size: None,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

impl AnalyzerConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StemmaError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: AnalyzerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the table locations.
    pub fn with_tables(mut self, tables: TableSources) -> Self {
        self.tables = tables;
        self
    }

    /// Set the script word pattern.
    pub fn with_script_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.script_pattern = pattern.into();
        self
    }

    /// Enable or disable strip-rule fix-ups in text analysis.
    pub fn with_rule_fixup(mut self, enabled: bool) -> Self {
        self.rule_fixup = enabled;
        self
    }

    /// Set the parallel fan-out threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the thread pool size.
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Set the empty-field placeholder of the rule table.
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.script_pattern.is_empty() {
            return Err(StemmaError::config("script_pattern must not be empty"));
        }
        regex::Regex::new(&self.script_pattern)
            .map_err(|e| StemmaError::config(format!("Invalid script_pattern: {e}")))?;
        if self.thread_pool_size == Some(0) {
            return Err(StemmaError::config("thread_pool_size must be at least 1"));
        }
        if self.placeholder.is_whitespace() {
            return Err(StemmaError::config("placeholder must not be whitespace"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.tables.roots, PathBuf::from("files/root"));
        assert_eq!(config.tables.suffixes, PathBuf::from("files/suffix.txt"));
        assert_eq!(config.tables.rules, PathBuf::from("files/suffix_rule.txt"));
        assert!(!config.rule_fixup);
        assert_eq!(config.placeholder, '.');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = AnalyzerConfig::default()
            .with_tables(TableSources::in_dir("/data"))
            .with_rule_fixup(true)
            .with_parallel_threshold(8)
            .with_thread_pool_size(2)
            .with_placeholder('_');

        assert_eq!(config.tables.rules, PathBuf::from("/data/suffix_rule.txt"));
        assert!(config.rule_fixup);
        assert_eq!(config.parallel_threshold, 8);
        assert_eq!(config.thread_pool_size, Some(2));
        assert_eq!(config.placeholder, '_');
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AnalyzerConfig::default().with_script_pattern("").validate().is_err());
        assert!(AnalyzerConfig::default().with_script_pattern("(").validate().is_err());
        assert!(AnalyzerConfig::default().with_thread_pool_size(0).validate().is_err());
        assert!(AnalyzerConfig::default().with_placeholder(' ').validate().is_err());
    }

    #[test]
    fn test_from_file_with_partial_keys() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tables": {{"roots": "r", "suffixes": "s", "rules": "t"}}, "rule_fixup": true}}"#
        )
        .unwrap();

        let config = AnalyzerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tables, TableSources::new("r", "s", "t"));
        assert!(config.rule_fixup);
        assert_eq!(config.script_pattern, DEVANAGARI_WORD_PATTERN);
    }

    #[test]
    fn test_from_missing_file() {
        let error = AnalyzerConfig::from_file("/nonexistent/stemma.json").unwrap_err();
        assert!(matches!(error, StemmaError::Config(_)));
    }
}
