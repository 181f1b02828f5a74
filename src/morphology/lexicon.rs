//! Parsers for the root and suffix tables.
//!
//! Both tables are `|`-delimited with one entry per line. Malformed lines are
//! returned as [`ParseError`]s next to the entries that did parse; they never
//! stop the parse.

use log::warn;

use crate::error::{ParseError, Table};
use crate::morphology::entry::{RootEntry, SuffixEntry};

/// Field separator used by the root and suffix tables.
pub const FIELD_SEPARATOR: char = '|';

/// Entries parsed from one table plus the lines that were rejected.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub entries: Vec<T>,
    pub errors: Vec<ParseError>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Parsed {
            entries: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> Parsed<T> {
    pub(crate) fn reject(&mut self, error: ParseError) {
        warn!("Skipping {error}");
        self.errors.push(error);
    }
}

/// Parse one line of the root table: `root`, `root|pos` or `root|pos|boundSuffix`.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_root_line(line: &str) -> Result<Option<RootEntry>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() > 3 {
        return Err(format!("expected at most 3 fields, found {}", fields.len()));
    }
    if fields[0].is_empty() {
        return Err("empty root".to_string());
    }

    let mut entry = RootEntry::new(fields[0]);
    if let Some(pos) = fields.get(1).filter(|pos| !pos.is_empty()) {
        entry = entry.with_pos(*pos);
    }
    if let Some(suffix) = fields.get(2).filter(|suffix| !suffix.is_empty()) {
        entry = entry.with_bound_suffix(*suffix);
    }
    Ok(Some(entry))
}

/// Parse one line of the suffix table: `suffix|ruleNumber`.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_suffix_line(line: &str) -> Result<Option<SuffixEntry>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    match fields.as_slice() {
        [_] => Err("missing '|' separator".to_string()),
        ["", _] => Err("empty suffix".to_string()),
        [suffix, rule] => Ok(Some(SuffixEntry::new(*suffix, *rule))),
        _ => Err(format!("expected 2 fields, found {}", fields.len())),
    }
}

/// Parse the whole root table.
pub fn parse_roots(text: &str) -> Parsed<RootEntry> {
    let mut parsed = Parsed::default();
    for (index, line) in text.lines().enumerate() {
        match parse_root_line(line) {
            Ok(Some(entry)) => parsed.entries.push(entry),
            Ok(None) => {}
            Err(reason) => parsed.reject(ParseError::new(Table::Roots, index + 1, reason)),
        }
    }
    parsed
}

/// Parse the whole suffix table. Duplicates are kept here; the repository
/// applies the override policy.
pub fn parse_suffixes(text: &str) -> Parsed<SuffixEntry> {
    let mut parsed = Parsed::default();
    for (index, line) in text.lines().enumerate() {
        match parse_suffix_line(line) {
            Ok(Some(entry)) => parsed.entries.push(entry),
            Ok(None) => {}
            Err(reason) => parsed.reject(ParseError::new(Table::Suffixes, index + 1, reason)),
        }
    }
    parsed
}
