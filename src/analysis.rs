//! Text analysis module for Stemma.
//!
//! Tokenization of free text into in-script words and the [`Stemmer`] seam
//! through which the morphological analyzer is exposed to token pipelines.
//!
//! [`Stemmer`]: stemmer::Stemmer

pub mod stemmer;
pub mod tokenizer;
