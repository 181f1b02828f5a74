//! Stemming interface.
//!
//! [`MorphAnalyzer`](crate::morphology::analyzer::MorphAnalyzer) implements
//! [`Stemmer`] by returning the root of its first analysis.

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}
