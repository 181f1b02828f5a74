//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split raw input into the words the analyzer looks at. The only
//! tokenizer shipped is [`script::ScriptTokenizer`], which keeps runs of
//! characters from the target script and drops everything else (digits,
//! Latin text, ASCII punctuation).

pub mod script;

pub use script::ScriptTokenizer;
