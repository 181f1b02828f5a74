//! The rule repository: roots, suffixes and transformation rules in memory.
//!
//! A [`Repository`] is built in one shot and never mutated afterward, so it
//! can be shared between threads behind an `Arc` without locking. Loading
//! fails only when a table cannot be read; malformed lines are skipped and
//! kept as [`diagnostics`](Repository::diagnostics).
//!
//! Duplicate handling:
//! - roots sharing a spelling are all kept (homographs);
//! - a suffix listed twice keeps its first position in the suffix order but
//!   takes the rule number of the last line that lists it;
//! - a rule number defined twice takes the last definition.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result, StemmaError, Table};
use crate::morphology::config::{AnalyzerConfig, TableSources};
use crate::morphology::entry::{RootEntry, SuffixEntry, TransformationRule};
use crate::morphology::lexicon::{parse_roots, parse_suffixes};
use crate::morphology::rule_table::{DEFAULT_PLACEHOLDER, parse_rules};

/// Summary counts of a loaded repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub root_entries: usize,
    pub distinct_roots: usize,
    pub suffixes: usize,
    pub rules: usize,
    pub regular_rules: usize,
    pub irregular_rules: usize,
    pub strip_rules: usize,
    pub skipped_lines: usize,
}

/// Immutable in-memory form of the three source tables.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    roots: Vec<RootEntry>,
    root_index: AHashMap<String, Vec<usize>>,
    suffixes: Vec<SuffixEntry>,
    suffix_index: AHashMap<String, usize>,
    rules: AHashMap<u32, TransformationRule>,
    diagnostics: Vec<ParseError>,
}

impl Repository {
    /// Load the three tables from disk.
    pub fn load(sources: &TableSources) -> Result<Self> {
        Self::load_with_placeholder(sources, DEFAULT_PLACEHOLDER)
    }

    /// Load the tables named by an analyzer configuration.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Self::load_with_placeholder(&config.tables, config.placeholder)
    }

    /// Load the three tables from disk with a custom rule-table placeholder.
    pub fn load_with_placeholder(sources: &TableSources, placeholder: char) -> Result<Self> {
        let roots = read_table(Table::Roots, &sources.roots)?;
        let suffixes = read_table(Table::Suffixes, &sources.suffixes)?;
        let rules = read_table(Table::Rules, &sources.rules)?;

        let repository = Self::build(&roots, &suffixes, &rules, placeholder);
        info!(
            "Loaded {} roots, {} suffixes and {} rules from '{}', '{}', '{}' ({} lines skipped)",
            repository.roots.len(),
            repository.suffixes.len(),
            repository.rules.len(),
            sources.roots.display(),
            sources.suffixes.display(),
            sources.rules.display(),
            repository.diagnostics.len()
        );
        Ok(repository)
    }

    /// Build a repository from table contents already in memory.
    pub fn from_tables(roots: &str, suffixes: &str, rules: &str) -> Self {
        Self::build(roots, suffixes, rules, DEFAULT_PLACEHOLDER)
    }

    fn build(roots: &str, suffixes: &str, rules: &str, placeholder: char) -> Self {
        let mut repository = Repository::default();

        let parsed_roots = parse_roots(roots);
        repository.diagnostics.extend(parsed_roots.errors);
        for entry in parsed_roots.entries {
            repository.insert_root(entry);
        }

        let parsed_suffixes = parse_suffixes(suffixes);
        repository.diagnostics.extend(parsed_suffixes.errors);
        for entry in parsed_suffixes.entries {
            repository.insert_suffix(entry);
        }

        let parsed_rules = parse_rules(rules, placeholder);
        repository.diagnostics.extend(parsed_rules.errors);
        for rule in parsed_rules.entries {
            repository.insert_rule(rule);
        }

        repository
    }

    fn insert_root(&mut self, entry: RootEntry) {
        let index = self.roots.len();
        self.root_index
            .entry(entry.text.clone())
            .or_default()
            .push(index);
        self.roots.push(entry);
    }

    fn insert_suffix(&mut self, entry: SuffixEntry) {
        let known = self.suffix_index.get(&entry.text).copied();
        match known {
            Some(index) => {
                let existing = &mut self.suffixes[index];
                debug!(
                    "Suffix '{}' listed again; rule {} replaces rule {}",
                    entry.text, entry.rule_number, existing.rule_number
                );
                existing.rule_number = entry.rule_number;
            }
            None => {
                self.suffix_index
                    .insert(entry.text.clone(), self.suffixes.len());
                self.suffixes.push(entry);
            }
        }
    }

    fn insert_rule(&mut self, rule: TransformationRule) {
        if let Some(previous) = self.rules.insert(rule.number, rule) {
            debug!("Rule {} defined again; last definition wins", previous.number);
        }
    }

    /// All root entries in table order, homographs included.
    pub fn roots(&self) -> &[RootEntry] {
        &self.roots
    }

    /// Every entry spelled `text`.
    pub fn root_entries(&self, text: &str) -> Vec<&RootEntry> {
        self.root_index
            .get(text)
            .map(|indices| indices.iter().map(|&index| &self.roots[index]).collect())
            .unwrap_or_default()
    }

    /// Whether `text` is a known root.
    pub fn is_root(&self, text: &str) -> bool {
        self.root_index.contains_key(text)
    }

    /// POS of the last entry recorded for `text`.
    pub fn pos_of(&self, text: &str) -> Option<&str> {
        self.last_root_entry(text)
            .and_then(|entry| entry.pos.as_deref())
    }

    /// Bound suffix of the last entry recorded for `text`.
    pub fn bound_suffix_of(&self, text: &str) -> Option<&str> {
        self.last_root_entry(text)
            .and_then(|entry| entry.bound_suffix.as_deref())
    }

    fn last_root_entry(&self, text: &str) -> Option<&RootEntry> {
        let index = *self.root_index.get(text)?.last()?;
        self.roots.get(index)
    }

    /// Suffixes in table order, one entry per spelling.
    pub fn suffixes(&self) -> &[SuffixEntry] {
        &self.suffixes
    }

    /// Look up a suffix by spelling.
    pub fn suffix(&self, text: &str) -> Option<&SuffixEntry> {
        self.suffix_index.get(text).map(|&index| &self.suffixes[index])
    }

    /// Look up a rule by number.
    pub fn rule(&self, number: u32) -> Option<&TransformationRule> {
        self.rules.get(&number)
    }

    /// The rule a suffix refers to, if its rule number resolves.
    pub fn resolve_rule(&self, suffix: &SuffixEntry) -> Option<&TransformationRule> {
        suffix.rule_key().and_then(|number| self.rule(number))
    }

    /// All rules ordered by number.
    pub fn rules(&self) -> Vec<&TransformationRule> {
        let mut rules: Vec<&TransformationRule> = self.rules.values().collect();
        rules.sort_by_key(|rule| rule.number);
        rules
    }

    /// Lines skipped while loading.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    /// Summary counts.
    pub fn stats(&self) -> RepositoryStats {
        let regular_rules = self.rules.values().filter(|rule| rule.is_regular()).count();
        RepositoryStats {
            root_entries: self.roots.len(),
            distinct_roots: self.root_index.len(),
            suffixes: self.suffixes.len(),
            rules: self.rules.len(),
            regular_rules,
            irregular_rules: self.rules.len() - regular_rules,
            strip_rules: self
                .rules
                .values()
                .map(|rule| rule.strip_rules().len())
                .sum(),
            skipped_lines: self.diagnostics.len(),
        }
    }
}

fn read_table(table: Table, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| StemmaError::load(table, path, e))
}
