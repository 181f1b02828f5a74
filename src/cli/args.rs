//! Command line argument parsing for the Stemma CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::morphology::config::{AnalyzerConfig, TableSources};

/// Stemma - rule-driven morphological analysis of Nepali words
#[derive(Parser, Debug, Clone)]
#[command(name = "stemma")]
#[command(about = "Find the roots, suffixes and rules behind Nepali words")]
#[command(version = crate::VERSION)]
#[command(long_about = None)]
pub struct StemmaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Analyzer configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "STEMMA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding `root`, `suffix.txt` and `suffix_rule.txt`
    #[arg(short, long, value_name = "DIR", env = "STEMMA_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Root table path (overrides the data directory)
    #[arg(long, value_name = "FILE", global = true)]
    pub roots: Option<PathBuf>,

    /// Suffix table path (overrides the data directory)
    #[arg(long, value_name = "FILE", global = true)]
    pub suffixes: Option<PathBuf>,

    /// Rule table path (overrides the data directory)
    #[arg(long, value_name = "FILE", global = true)]
    pub rules: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl StemmaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }

    /// Build the analyzer configuration: the config file (or defaults), then
    /// the data directory, then individual table paths.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::from_file(path)?,
            None => AnalyzerConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.tables = TableSources::in_dir(dir);
        }
        if let Some(roots) = &self.roots {
            config.tables.roots = roots.clone();
        }
        if let Some(suffixes) = &self.suffixes {
            config.tables.suffixes = suffixes.clone();
        }
        if let Some(rules) = &self.rules {
            config.tables.rules = rules.clone();
        }

        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze text, or words given on the command line
    Analyze(AnalyzeArgs),

    /// Print the most plausible root of each word
    Stem(StemArgs),

    /// Show repository statistics and skipped table lines
    Inspect(InspectArgs),

    /// Show one transformation rule
    Rule(RuleArgs),
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Read the text from a file
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Also rebuild roots through the rules' strip patterns
    #[arg(long)]
    pub rule_fixup: bool,

    /// Number of threads for analysis
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Arguments for stemming words
#[derive(Parser, Debug, Clone)]
pub struct StemArgs {
    /// Words to stem
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Also rebuild roots through the rules' strip patterns
    #[arg(long)]
    pub rule_fixup: bool,
}

/// Arguments for inspecting the repository
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// List the table lines skipped while loading
    #[arg(long)]
    pub diagnostics: bool,

    /// Maximum number of skipped lines to list
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for showing a rule
#[derive(Parser, Debug, Clone)]
pub struct RuleArgs {
    /// Rule number
    #[arg(value_name = "NUMBER")]
    pub number: u32,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl AnalyzeArgs {
    /// The text given on the command line, if any.
    pub fn inline_text(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_version_matches_crate() {
        let command = StemmaArgs::command();
        assert_eq!(command.get_version(), Some(crate::VERSION));
    }

    #[test]
    fn test_analyze_command() {
        let args = StemmaArgs::try_parse_from([
            "stemma",
            "analyze",
            "घरहरू",
            "राम्रो",
            "--rule-fixup",
            "--threads",
            "4",
        ])
        .unwrap();

        if let Command::Analyze(analyze_args) = args.command {
            assert_eq!(analyze_args.inline_text().as_deref(), Some("घरहरू राम्रो"));
            assert!(analyze_args.rule_fixup);
            assert_eq!(analyze_args.threads, Some(4));
            assert_eq!(analyze_args.file, None);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_analyze_file_conflicts_with_text() {
        let result = StemmaArgs::try_parse_from([
            "stemma", "analyze", "घर", "--file", "input.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stem_requires_words() {
        assert!(StemmaArgs::try_parse_from(["stemma", "stem"]).is_err());
    }

    #[test]
    fn test_rule_command() {
        let args = StemmaArgs::try_parse_from(["stemma", "rule", "42"]).unwrap();
        match args.command {
            Command::Rule(rule_args) => assert_eq!(rule_args.number, 42),
            _ => panic!("Expected Rule command"),
        }
    }

    #[test]
    fn test_global_options() {
        let args = StemmaArgs::try_parse_from([
            "stemma", "inspect", "--diagnostics", "-f", "json", "--pretty", "-vv",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        assert_eq!(args.verbosity(), 3);
        match args.command {
            Command::Inspect(inspect_args) => {
                assert!(inspect_args.diagnostics);
                assert_eq!(inspect_args.limit, 20);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let quiet = StemmaArgs::try_parse_from(["stemma", "-q", "rule", "1"]).unwrap();
        assert_eq!(quiet.verbosity(), 0);

        let normal = StemmaArgs::try_parse_from(["stemma", "rule", "1"]).unwrap();
        assert_eq!(normal.verbosity(), 1);
    }

    #[test]
    fn test_table_overrides() {
        let args = StemmaArgs::try_parse_from([
            "stemma",
            "--data-dir",
            "/data",
            "--rules",
            "/other/rules.txt",
            "inspect",
        ])
        .unwrap();

        let config = args.analyzer_config().unwrap();
        assert_eq!(config.tables.roots, PathBuf::from("/data/root"));
        assert_eq!(config.tables.suffixes, PathBuf::from("/data/suffix.txt"));
        assert_eq!(config.tables.rules, PathBuf::from("/other/rules.txt"));
    }
}
