//! Rule-driven morphological analysis.
//!
//! A [`Repository`] is loaded once from three data tables (roots, suffixes and
//! transformation rules) and shared read-only with any number of
//! [`MorphAnalyzer`]s. The analyzer enumerates every (root, suffix, rule)
//! decomposition of a word that the tables support; ranking the candidates is
//! left to the caller.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use stemma::morphology::{Analysis, MorphAnalyzer, Repository};
//!
//! let repository = Repository::from_tables("घर|NN", "हरू|1", "1 SFX 1 हरू HRU 0\nहरू .");
//! let analyzer = MorphAnalyzer::new(Arc::new(repository));
//!
//! let result = analyzer.analyze("घरहरू");
//! assert!(!result.is_root);
//! match &result.analyses[0] {
//!     Analysis::RootPlusSuffix { root, suffix, .. } => {
//!         assert_eq!(root, "घर");
//!         assert_eq!(suffix, "हरू");
//!     }
//!     other => panic!("unexpected analysis: {other:?}"),
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod entry;
pub mod lexicon;
pub mod repository;
pub mod result;
pub mod rule_table;

pub use analyzer::MorphAnalyzer;
pub use config::{AnalyzerConfig, TableSources};
pub use entry::{RootEntry, RuleKind, StripRule, SuffixEntry, TransformationRule};
pub use repository::{Repository, RepositoryStats};
pub use result::{Analysis, AnalysisResult, AnalysisRow, AnalysisTotals, TextAnalysis};
