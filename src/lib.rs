//! # Stemma
//!
//! A rule-driven morphological analyzer for Nepali.
//!
//! ## Features
//!
//! - Loads root, suffix and transformation-rule tables, tolerating ragged lines
//! - Enumerates every root + suffix decomposition of a word
//! - Optional spelling fix-up through the rules' strip patterns
//! - Lock-free sharing of one loaded repository across threads
//! - Parallel analysis of free text

pub mod analysis;
pub mod cli;
pub mod error;
pub mod morphology;

pub mod prelude {
    pub use crate::analysis::stemmer::Stemmer;
    pub use crate::error::{Result, StemmaError};
    pub use crate::morphology::{
        Analysis, AnalysisResult, AnalyzerConfig, MorphAnalyzer, Repository, TableSources,
        TextAnalysis,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
