//! Command implementations for the Stemma CLI.

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use log::{debug, warn};

use crate::analysis::stemmer::Stemmer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, StemmaError};
use crate::morphology::analyzer::MorphAnalyzer;
use crate::morphology::config::AnalyzerConfig;
use crate::morphology::repository::Repository;

/// Execute a CLI command.
pub fn execute_command(args: StemmaArgs) -> Result<()> {
    let config = args.analyzer_config()?;
    match &args.command {
        Command::Analyze(analyze_args) => analyze_text(analyze_args.clone(), config, &args),
        Command::Stem(stem_args) => stem_words(stem_args.clone(), config, &args),
        Command::Inspect(inspect_args) => inspect_repository(inspect_args.clone(), config, &args),
        Command::Rule(rule_args) => show_rule(rule_args.clone(), config, &args),
    }
}

/// Load the repository named by the configuration.
fn load_repository(config: &AnalyzerConfig) -> Result<Arc<Repository>> {
    let start_time = Instant::now();
    let repository = Repository::from_config(config)?;
    debug!("Repository loaded in {}ms", start_time.elapsed().as_millis());
    Ok(Arc::new(repository))
}

/// Analyze text from the command line, a file or stdin.
fn analyze_text(args: AnalyzeArgs, config: AnalyzerConfig, cli_args: &StemmaArgs) -> Result<()> {
    let text = read_input(&args)?;

    let rule_fixup = config.rule_fixup || args.rule_fixup;
    let mut config = config.with_rule_fixup(rule_fixup);
    if let Some(threads) = args.threads {
        config = config.with_thread_pool_size(threads);
    }

    let repository = load_repository(&config)?;
    let analyzer = MorphAnalyzer::with_config(repository, config)?;

    let start_time = Instant::now();
    let analysis = analyzer.analyze_text(&text);
    debug!(
        "Analyzed {} words in {}ms",
        analysis.totals.word_count,
        start_time.elapsed().as_millis()
    );

    if analysis.words.is_empty() && cli_args.verbosity() > 0 {
        warn!("No words of the target script found in the input");
    }

    output_result("Analysis completed", &analysis, cli_args)
}

/// The text to analyze: inline arguments, then `--file`, then stdin.
fn read_input(args: &AnalyzeArgs) -> Result<String> {
    let text = match (args.inline_text(), &args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("cannot read input file '{}'", path.display()))?,
        (None, None) => io::read_to_string(io::stdin()).context("cannot read stdin")?,
    };
    Ok(text)
}

/// Stem each word given on the command line.
fn stem_words(args: StemArgs, config: AnalyzerConfig, cli_args: &StemmaArgs) -> Result<()> {
    let rule_fixup = config.rule_fixup || args.rule_fixup;
    let config = config.with_rule_fixup(rule_fixup);
    let repository = load_repository(&config)?;
    let analyzer = MorphAnalyzer::with_config(repository, config)?;

    let results: Vec<StemResult> = args
        .words
        .iter()
        .map(|word| StemResult {
            word: word.clone(),
            stem: analyzer.stem(word),
        })
        .collect();

    output_result("Stemming completed", &results, cli_args)
}

/// Show repository statistics.
fn inspect_repository(
    args: InspectArgs,
    config: AnalyzerConfig,
    cli_args: &StemmaArgs,
) -> Result<()> {
    let repository = load_repository(&config)?;

    let diagnostics = args.diagnostics.then(|| {
        repository
            .diagnostics()
            .iter()
            .take(args.limit)
            .cloned()
            .collect()
    });

    output_result(
        "Repository loaded",
        &InspectionResult {
            stats: repository.stats(),
            diagnostics,
        },
        cli_args,
    )
}

/// Show one rule and the suffixes that reference it.
fn show_rule(args: RuleArgs, config: AnalyzerConfig, cli_args: &StemmaArgs) -> Result<()> {
    let repository = load_repository(&config)?;
    let rule = repository
        .rule(args.number)
        .ok_or_else(|| StemmaError::not_found(format!("rule {}", args.number)))?;

    let suffixes = repository
        .suffixes()
        .iter()
        .filter(|suffix| suffix.rule_key() == Some(args.number))
        .map(|suffix| suffix.text.clone())
        .collect();

    output_result("Rule found", &RuleReport::new(rule, suffixes), cli_args)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;

    fn analyze_args(text: &[&str], file: Option<PathBuf>) -> AnalyzeArgs {
        AnalyzeArgs {
            text: text.iter().map(|word| word.to_string()).collect(),
            file,
            rule_fixup: false,
            threads: None,
        }
    }

    #[test]
    fn test_read_inline_text() {
        let args = analyze_args(&["घर", "छ"], None);
        assert_eq!(read_input(&args).unwrap(), "घर छ");
    }

    #[test]
    fn test_read_input_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "किताबलाई पढ्").unwrap();

        let args = analyze_args(&[], Some(file.path().to_path_buf()));
        assert_eq!(read_input(&args).unwrap(), "किताबलाई पढ्");
    }

    #[test]
    fn test_missing_input_file_names_path() {
        let args = analyze_args(&[], Some(PathBuf::from("/nonexistent/stemma/input.txt")));
        let error = read_input(&args).unwrap_err();

        assert!(matches!(error, StemmaError::Anyhow(_)));
        assert!(
            error
                .to_string()
                .contains("cannot read input file '/nonexistent/stemma/input.txt'")
        );
    }
}
