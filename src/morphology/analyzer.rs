//! The analyzer engine.
//!
//! [`MorphAnalyzer::analyze`] is a pure function of the shared repository and
//! the input word. Analyses come out in a fixed order: the root match first
//! (if any), then one candidate per matching suffix in suffix-table order.
//! Every match is reported; the caller ranks them.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::stemmer::Stemmer;
use crate::analysis::tokenizer::ScriptTokenizer;
use crate::error::{Result, StemmaError};
use crate::morphology::config::AnalyzerConfig;
use crate::morphology::entry::{StripRule, SuffixEntry};
use crate::morphology::repository::Repository;
use crate::morphology::result::{Analysis, AnalysisResult, TextAnalysis, UNKNOWN_RULE_TAG};

/// Morphological analyzer over a shared [`Repository`].
#[derive(Debug, Clone)]
pub struct MorphAnalyzer {
    repository: Arc<Repository>,
    tokenizer: ScriptTokenizer,
    config: AnalyzerConfig,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl MorphAnalyzer {
    /// Create an analyzer with the default configuration. Text analysis runs
    /// on rayon's global pool.
    pub fn new(repository: Arc<Repository>) -> Self {
        MorphAnalyzer {
            repository,
            tokenizer: ScriptTokenizer::default(),
            config: AnalyzerConfig::default(),
            thread_pool: None,
        }
    }

    /// Create an analyzer with its own configuration and thread pool.
    pub fn with_config(repository: Arc<Repository>, config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = ScriptTokenizer::with_pattern(&config.script_pattern)?;

        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("stemma-analyze-{i}"))
            .build()
            .map_err(|e| StemmaError::analysis(format!("Failed to create thread pool: {e}")))?;

        Ok(MorphAnalyzer {
            repository,
            tokenizer,
            config,
            thread_pool: Some(Arc::new(thread_pool)),
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one word by literal suffix stripping.
    pub fn analyze(&self, word: &str) -> AnalysisResult {
        self.analyze_word(word, false)
    }

    /// Analyze one word, additionally rebuilding roots through the strip
    /// rules of each matching suffix's rule.
    pub fn analyze_with_rule_fixup(&self, word: &str) -> AnalysisResult {
        self.analyze_word(word, true)
    }

    /// Analyze words independently, preserving their order. The configured
    /// `rule_fixup` decides which variant runs.
    pub fn analyze_words<S>(&self, words: &[S]) -> Vec<AnalysisResult>
    where
        S: AsRef<str> + Sync,
    {
        let fixup = self.config.rule_fixup;
        if words.len() < self.config.parallel_threshold {
            return words
                .iter()
                .map(|word| self.analyze_word(word.as_ref(), fixup))
                .collect();
        }

        let run = || -> Vec<AnalysisResult> {
            words
                .par_iter()
                .map(|word| self.analyze_word(word.as_ref(), fixup))
                .collect()
        };
        match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Extract the in-script words of `text`, analyze each and total them up.
    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        let words = self.tokenizer.words(text);
        TextAnalysis::new(self.analyze_words(&words))
    }

    fn analyze_word(&self, word: &str, fixup: bool) -> AnalysisResult {
        let word = word.trim();
        let repository = &*self.repository;
        let mut analyses = Vec::new();

        let is_root = repository.is_root(word);
        if is_root {
            analyses.push(Analysis::RootMatch {
                root: word.to_string(),
                pos: repository.pos_of(word).map(str::to_string),
            });
        }

        for suffix in repository.suffixes() {
            // A suffix spanning the whole word would leave an empty root.
            let stem = match word.strip_suffix(suffix.text.as_str()) {
                Some(stem) if !stem.is_empty() => stem,
                _ => continue,
            };

            if repository.is_root(stem) {
                analyses.push(self.candidate(stem, suffix, None));
            }
            if fixup {
                self.push_fixups(word, stem, suffix, &mut analyses);
            }
        }

        if analyses.is_empty() {
            analyses.push(Analysis::Unknown);
        }

        AnalysisResult {
            word: word.to_string(),
            is_root,
            analyses,
        }
    }

    fn push_fixups(
        &self,
        word: &str,
        stem: &str,
        suffix: &SuffixEntry,
        analyses: &mut Vec<Analysis>,
    ) {
        let rule = match self.repository.resolve_rule(suffix) {
            Some(rule) if rule.is_regular() => rule,
            _ => return,
        };

        let mut seen: Vec<String> = Vec::new();
        for strip_rule in rule.strip_rules() {
            let Some(rebuilt) = strip_rule.apply(word) else {
                continue;
            };
            if rebuilt.is_empty() || rebuilt == stem || rebuilt == word || seen.contains(&rebuilt)
            {
                continue;
            }
            if self.repository.is_root(&rebuilt) {
                analyses.push(self.candidate(&rebuilt, suffix, Some(strip_rule.clone())));
                seen.push(rebuilt);
            }
        }
    }

    fn candidate(
        &self,
        root: &str,
        suffix: &SuffixEntry,
        strip_rule: Option<StripRule>,
    ) -> Analysis {
        let rule_tag = self
            .repository
            .resolve_rule(suffix)
            .map_or(UNKNOWN_RULE_TAG, |rule| rule.tag.as_str());

        Analysis::RootPlusSuffix {
            root: root.to_string(),
            suffix: suffix.text.clone(),
            pos: self.repository.pos_of(root).map(str::to_string),
            rule_number: suffix.rule_number.clone(),
            rule_tag: rule_tag.to_string(),
            strip_rule,
        }
    }
}

impl Stemmer for MorphAnalyzer {
    /// The root of the first analysis, or the word itself when unknown.
    fn stem(&self, word: &str) -> String {
        let result = self.analyze_word(word, self.config.rule_fixup);
        result
            .analyses
            .iter()
            .find_map(Analysis::root)
            .map(str::to_string)
            .unwrap_or(result.word)
    }

    fn name(&self) -> &'static str {
        "morph"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOTS: &str = "घर|NN\nकिताब|NN\nबनाउ|VF\nराम्रो|ADJ\nमा|PPG\n";
    const SUFFIXES: &str = "हरू|1\nलाई|2\nमा|3\nा|9\nएका|5\n";
    const RULES: &str = "\
1 SFX 1 हरू HRU 0
हरू .
2 SFX 1 लाई LAI 0
लाई .
3 SFX 1 मा MA 0
मा .
5 SFX 2 एका EKA 0
एका .
ाएका ाउ
";

    fn analyzer() -> MorphAnalyzer {
        MorphAnalyzer::new(Arc::new(Repository::from_tables(ROOTS, SUFFIXES, RULES)))
    }

    #[test]
    fn test_root_word() {
        let result = analyzer().analyze("घर");
        assert!(result.is_root);
        assert_eq!(
            result.analyses,
            vec![Analysis::RootMatch {
                root: "घर".to_string(),
                pos: Some("NN".to_string()),
            }]
        );
    }

    #[test]
    fn test_root_plus_suffix() {
        let result = analyzer().analyze("किताबलाई");
        assert!(!result.is_root);
        assert_eq!(result.analyses.len(), 1);
        match &result.analyses[0] {
            Analysis::RootPlusSuffix {
                root,
                suffix,
                pos,
                rule_number,
                rule_tag,
                strip_rule,
            } => {
                assert_eq!(root, "किताब");
                assert_eq!(suffix, "लाई");
                assert_eq!(pos.as_deref(), Some("NN"));
                assert_eq!(rule_number, "2");
                assert_eq!(rule_tag, "LAI");
                assert!(strip_rule.is_none());
            }
            other => panic!("unexpected analysis: {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_rule_still_matches() {
        // Suffix "ा" points at rule 9, which is not defined.
        let result = analyzer().analyze("घरा");
        assert_eq!(result.analyses.len(), 1);
        match &result.analyses[0] {
            Analysis::RootPlusSuffix { rule_tag, rule_number, .. } => {
                assert_eq!(rule_tag, UNKNOWN_RULE_TAG);
                assert_eq!(rule_number, "9");
            }
            other => panic!("unexpected analysis: {other:?}"),
        }
    }

    #[test]
    fn test_word_equal_to_suffix_is_not_split() {
        // "मा" is both a root and a suffix.
        let result = analyzer().analyze("मा");
        assert!(result.is_root);
        assert_eq!(result.analyses.len(), 1);
        assert!(matches!(result.analyses[0], Analysis::RootMatch { .. }));
    }

    #[test]
    fn test_unknown_word() {
        let result = analyzer().analyze("xyz123");
        assert!(!result.is_root);
        assert_eq!(result.analyses, vec![Analysis::Unknown]);
        assert!(!result.is_analyzed());
    }

    #[test]
    fn test_rule_fixup_rebuilds_root() {
        let analyzer = analyzer();

        // Literal stripping of "एका" leaves "बना", which is not a root.
        let literal = analyzer.analyze("बनाएका");
        assert_eq!(literal.analyses, vec![Analysis::Unknown]);

        let fixed = analyzer.analyze_with_rule_fixup("बनाएका");
        assert_eq!(fixed.analyses.len(), 1);
        match &fixed.analyses[0] {
            Analysis::RootPlusSuffix { root, suffix, strip_rule, .. } => {
                assert_eq!(root, "बनाउ");
                assert_eq!(suffix, "एका");
                assert_eq!(strip_rule.as_ref(), Some(&StripRule::new("ाएका", "ाउ")));
            }
            other => panic!("unexpected analysis: {other:?}"),
        }
    }

    #[test]
    fn test_rule_fixup_does_not_duplicate_literal_match() {
        let result = analyzer().analyze_with_rule_fixup("घरहरू");
        assert_eq!(result.analyses.len(), 1);
        assert_eq!(result.roots(), vec!["घर"]);
    }

    #[test]
    fn test_analyze_text_totals() {
        let analysis = analyzer().analyze_text("घर, किताबलाई xyz छ।");
        let words: Vec<&str> = analysis.words.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["घर", "किताबलाई", "छ।"]);
        assert_eq!(analysis.totals.word_count, 3);
        assert_eq!(analysis.totals.root_count, 1);
        assert_eq!(analysis.totals.analyzed_count, 2);
        assert_eq!(analysis.totals.unknown_count, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let repository = Arc::new(Repository::from_tables(ROOTS, SUFFIXES, RULES));
        let sequential = MorphAnalyzer::new(repository.clone());
        let parallel = MorphAnalyzer::with_config(
            repository,
            AnalyzerConfig::default()
                .with_parallel_threshold(1)
                .with_thread_pool_size(2),
        )
        .unwrap();

        let text = "घर घरहरू किताबलाई राम्रो छ ".repeat(20);
        assert_eq!(sequential.analyze_text(&text), parallel.analyze_text(&text));
    }

    #[test]
    fn test_stemmer() {
        let analyzer = analyzer();
        assert_eq!(analyzer.stem("घरहरू"), "घर");
        assert_eq!(analyzer.stem("घर"), "घर");
        assert_eq!(analyzer.stem("अज्ञात"), "अज्ञात");
        assert_eq!(analyzer.name(), "morph");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let repository = Arc::new(Repository::default());
        let config = AnalyzerConfig::default().with_script_pattern("[");
        assert!(MorphAnalyzer::with_config(repository, config).is_err());
    }
}
