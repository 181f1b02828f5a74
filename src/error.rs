//! Error types for the Stemma library.
//!
//! All fallible operations return [`StemmaError`] through the [`Result`] alias.
//! Loading the data tables is the only place a hard failure can happen; the
//! analyzer itself never fails.
//!
//! # Examples
//!
//! ```
//! use stemma::error::{Result, StemmaError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(StemmaError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three source tables a repository is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    /// Root lexicon (`root|pos|boundSuffix`).
    Roots,
    /// Suffix index (`suffix|ruleNumber`).
    Suffixes,
    /// Transformation rule definitions.
    Rules,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Roots => "root table",
            Table::Suffixes => "suffix table",
            Table::Rules => "rule table",
        };
        f.write_str(name)
    }
}

/// A malformed line in one of the source tables.
///
/// These never abort a load; the repository keeps them as diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{table} line {line}: {reason}")]
pub struct ParseError {
    /// Table the line came from.
    pub table: Table,
    /// 1-based line number in the source text.
    pub line: usize,
    /// Why the line was rejected.
    pub reason: String,
}

impl ParseError {
    /// Create a new parse error for a table line.
    pub fn new<S: Into<String>>(table: Table, line: usize, reason: S) -> Self {
        ParseError {
            table,
            line,
            reason: reason.into(),
        }
    }
}

/// The main error type for Stemma operations.
#[derive(Error, Debug)]
pub enum StemmaError {
    /// A source table could not be read.
    #[error("Failed to load {table} from '{}': {source}", .path.display())]
    Load {
        table: Table,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A malformed table line surfaced as a hard error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Analysis-related errors (tokenization, engine setup)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors carrying `anyhow` context, such as CLI input reads
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with StemmaError.
pub type Result<T> = std::result::Result<T, StemmaError>;

impl StemmaError {
    /// Create a new load error for a table.
    pub fn load<P: Into<PathBuf>>(table: Table, path: P, source: io::Error) -> Self {
        StemmaError::Load {
            table,
            path: path.into(),
            source,
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        StemmaError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        StemmaError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StemmaError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        StemmaError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        StemmaError::Other(format!("Not found: {}", msg.into()))
    }

    /// Whether this error came from reading a source table.
    pub fn is_load_error(&self) -> bool {
        matches!(self, StemmaError::Load { .. })
    }
}
