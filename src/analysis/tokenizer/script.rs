//! Script-restricted tokenizer.

use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, StemmaError};

/// The whole Devanagari block, U+0900 to U+097F.
///
/// The block includes danda (`।`) and double danda (`॥`), so a word written
/// against a sentence mark stays attached to it.
pub const DEVANAGARI_WORD_PATTERN: &str = r"[\x{0900}-\x{097F}]+";

/// A tokenizer that extracts maximal runs of characters matching a script
/// character class.
#[derive(Clone, Debug)]
pub struct ScriptTokenizer {
    pattern: Arc<Regex>,
}

impl ScriptTokenizer {
    /// Create a tokenizer for Devanagari words.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEVANAGARI_WORD_PATTERN)
    }

    /// Create a tokenizer with a custom word pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(StemmaError::analysis("Script pattern must not be empty"));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| StemmaError::analysis(format!("Invalid script pattern: {e}")))?;

        Ok(ScriptTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Extract the words of `text` as owned strings, in order of appearance.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|mat| mat.as_str().to_string())
            .collect()
    }
}

impl Default for ScriptTokenizer {
    fn default() -> Self {
        Self::new().expect("Default script pattern should be valid")
    }
}
