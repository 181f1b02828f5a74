//! Results produced by the morphological analyzer.

use serde::{Deserialize, Serialize};

use crate::morphology::entry::StripRule;

/// Tag reported for a suffix whose rule number has no rule.
pub const UNKNOWN_RULE_TAG: &str = "unknown rule";

/// POS shown for roots recorded without one.
pub const UNKNOWN_POS: &str = "Unknown";

/// One way of explaining a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Analysis {
    /// The word itself is a known root.
    RootMatch { root: String, pos: Option<String> },

    /// The word is a known root followed by a known suffix.
    RootPlusSuffix {
        root: String,
        suffix: String,
        pos: Option<String>,
        rule_number: String,
        rule_tag: String,
        /// The strip rule that rebuilt the root's spelling, `None` when the
        /// suffix was removed literally.
        strip_rule: Option<StripRule>,
    },

    /// Nothing in the tables explains the word.
    Unknown,
}

impl Analysis {
    /// The proposed root, if any.
    pub fn root(&self) -> Option<&str> {
        match self {
            Analysis::RootMatch { root, .. } | Analysis::RootPlusSuffix { root, .. } => {
                Some(root.as_str())
            }
            Analysis::Unknown => None,
        }
    }

    /// The suffix split off, if any.
    pub fn suffix(&self) -> Option<&str> {
        match self {
            Analysis::RootPlusSuffix { suffix, .. } => Some(suffix.as_str()),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Analysis::Unknown)
    }

    /// Display label of the analysis kind.
    pub fn label(&self) -> &'static str {
        match self {
            Analysis::RootMatch { .. } => "Root Word",
            Analysis::RootPlusSuffix { .. } => "Root + Suffix",
            Analysis::Unknown => "Unknown",
        }
    }
}

/// All analyses of one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub word: String,
    pub is_root: bool,
    /// Never empty: holds `[Unknown]` when nothing matched.
    pub analyses: Vec<Analysis>,
}

impl AnalysisResult {
    /// Whether at least one analysis explains the word.
    pub fn is_analyzed(&self) -> bool {
        self.analyses.iter().any(|analysis| !analysis.is_unknown())
    }

    /// Distinct proposed roots in analysis order.
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = Vec::new();
        for root in self.analyses.iter().filter_map(Analysis::root) {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }
}

/// Word counts over one analyzed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTotals {
    pub word_count: usize,
    /// Words that are themselves roots.
    pub root_count: usize,
    /// Words with at least one non-`Unknown` analysis.
    pub analyzed_count: usize,
    pub unknown_count: usize,
}

impl AnalysisTotals {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut totals = AnalysisTotals {
            word_count: results.len(),
            ..Default::default()
        };
        for result in results {
            if result.is_root {
                totals.root_count += 1;
            }
            if result.is_analyzed() {
                totals.analyzed_count += 1;
            }
        }
        totals.unknown_count = totals.word_count - totals.analyzed_count;
        totals
    }
}

/// Per-word results and totals for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub words: Vec<AnalysisResult>,
    pub totals: AnalysisTotals,
}

impl TextAnalysis {
    pub fn new(words: Vec<AnalysisResult>) -> Self {
        let totals = AnalysisTotals::from_results(&words);
        TextAnalysis { words, totals }
    }

    /// One flat row per analysis, for tabular output.
    pub fn rows(&self) -> Vec<AnalysisRow> {
        self.words
            .iter()
            .flat_map(|result| {
                result
                    .analyses
                    .iter()
                    .map(|analysis| AnalysisRow::new(&result.word, analysis))
            })
            .collect()
    }
}

/// A flattened analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub word: String,
    pub kind: String,
    pub root: String,
    pub suffix: String,
    pub pos: String,
    pub rule_number: String,
    pub rule_tag: String,
}

impl AnalysisRow {
    /// Column names in export order.
    pub const COLUMNS: [&'static str; 7] = [
        "word",
        "kind",
        "root",
        "suffix",
        "pos",
        "rule_number",
        "rule_tag",
    ];

    pub fn new(word: &str, analysis: &Analysis) -> Self {
        let dash = || "-".to_string();
        let pos_or_unknown =
            |pos: &Option<String>| pos.clone().unwrap_or_else(|| UNKNOWN_POS.to_string());

        let (root, suffix, pos, rule_number, rule_tag) = match analysis {
            Analysis::RootMatch { root, pos } => {
                (root.clone(), dash(), pos_or_unknown(pos), dash(), dash())
            }
            Analysis::RootPlusSuffix {
                root,
                suffix,
                pos,
                rule_number,
                rule_tag,
                ..
            } => (
                root.clone(),
                suffix.clone(),
                pos_or_unknown(pos),
                rule_number.clone(),
                rule_tag.clone(),
            ),
            Analysis::Unknown => (dash(), dash(), "Not found".to_string(), dash(), dash()),
        };

        AnalysisRow {
            word: word.to_string(),
            kind: analysis.label().to_string(),
            root,
            suffix,
            pos,
            rule_number,
            rule_tag,
        }
    }
}
