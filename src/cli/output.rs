//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, StemmaArgs};
use crate::error::{ParseError, Result};
use crate::morphology::entry::TransformationRule;
use crate::morphology::repository::RepositoryStats;
use crate::morphology::result::{Analysis, AnalysisRow, TextAnalysis, UNKNOWN_POS};

/// Result of stemming one word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StemResult {
    pub word: String,
    pub stem: String,
}

/// Repository statistics with optional skipped lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionResult {
    pub stats: RepositoryStats,
    pub diagnostics: Option<Vec<ParseError>>,
}

/// One transformation rule and the suffixes pointing at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleReport {
    pub number: u32,
    pub kind: String,
    pub sub_rule_count: usize,
    pub morph_form: String,
    pub tag: String,
    pub ignore_in_second_pass: bool,
    pub is_default: bool,
    pub strip_rules: Vec<String>,
    pub suffixes: Vec<String>,
}

impl RuleReport {
    pub fn new(rule: &TransformationRule, suffixes: Vec<String>) -> Self {
        RuleReport {
            number: rule.number,
            kind: rule.kind.to_string(),
            sub_rule_count: rule.sub_rule_count,
            morph_form: rule.morph_form.clone(),
            tag: rule.tag.clone(),
            ignore_in_second_pass: rule.ignore_in_second_pass,
            is_default: rule.is_default(),
            strip_rules: rule.strip_rules().iter().map(ToString::to_string).collect(),
            suffixes,
        }
    }
}

/// Values the CLI can print.
pub trait CliOutput: Serialize {
    /// Print in human-readable form.
    fn print_human(&self, args: &StemmaArgs) -> Result<()>;

    /// The value laid out for CSV: an array of flat objects becomes rows.
    fn csv_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Fixed column order for CSV rows; `None` uses the object's key order.
    fn csv_columns(&self) -> Option<&'static [&'static str]> {
        None
    }
}

/// Output a result in the specified format.
pub fn output_result<T: CliOutput>(message: &str, result: &T, args: &StemmaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args)
        }
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Csv => output_csv(&result.csv_value()?, result.csv_columns()),
        OutputFormat::Yaml => {
            print_yaml_value(&serde_json::to_value(result)?, 0);
            Ok(())
        }
    }
}

impl CliOutput for TextAnalysis {
    fn print_human(&self, _args: &StemmaArgs) -> Result<()> {
        println!("Analysis Results:");
        println!("═════════════════");
        println!("Total words: {}", self.totals.word_count);
        println!("Root words: {}", self.totals.root_count);
        println!("Analyzed words: {}", self.totals.analyzed_count);
        println!("Unknown words: {}", self.totals.unknown_count);

        for result in &self.words {
            println!();
            println!("Word: {}", result.word);
            for analysis in &result.analyses {
                println!("  {}", describe_analysis(analysis));
            }
        }
        Ok(())
    }

    fn csv_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.rows())?)
    }

    fn csv_columns(&self) -> Option<&'static [&'static str]> {
        Some(&AnalysisRow::COLUMNS)
    }
}

impl CliOutput for Vec<StemResult> {
    fn print_human(&self, _args: &StemmaArgs) -> Result<()> {
        for result in self {
            println!("{}\t{}", result.word, result.stem);
        }
        Ok(())
    }
}

impl CliOutput for InspectionResult {
    fn print_human(&self, _args: &StemmaArgs) -> Result<()> {
        println!("Repository Statistics:");
        println!("══════════════════════");
        output_generic_human(&serde_json::to_value(&self.stats)?);

        if let Some(diagnostics) = &self.diagnostics {
            println!();
            println!("Skipped Lines:");
            println!("──────────────");
            if diagnostics.is_empty() {
                println!("(none)");
            }
            for diagnostic in diagnostics {
                println!("{diagnostic}");
            }
        }
        Ok(())
    }
}

impl CliOutput for RuleReport {
    fn print_human(&self, _args: &StemmaArgs) -> Result<()> {
        if self.is_default {
            println!("Rule {} ({}, default)", self.number, self.kind);
        } else {
            println!("Rule {} ({})", self.number, self.kind);
        }
        println!("─────────────");
        println!("Morph: {}", self.morph_form);
        println!("Tag: {}", self.tag);
        println!("Ignore in second pass: {}", self.ignore_in_second_pass);
        println!("Declared sub-rules: {}", self.sub_rule_count);
        for strip_rule in &self.strip_rules {
            println!("  {strip_rule}");
        }
        if !self.suffixes.is_empty() {
            println!("Suffixes: {}", self.suffixes.join(", "));
        }
        Ok(())
    }
}

/// One-line description of an analysis.
pub fn describe_analysis(analysis: &Analysis) -> String {
    let pos = |pos: &Option<String>| pos.as_deref().unwrap_or(UNKNOWN_POS).to_string();
    match analysis {
        Analysis::RootMatch { root, pos: tag } => {
            format!("{}: root={} pos={}", analysis.label(), root, pos(tag))
        }
        Analysis::RootPlusSuffix {
            root,
            suffix,
            pos: tag,
            rule_number,
            rule_tag,
            strip_rule,
        } => {
            let mut line = format!(
                "{}: root={} suffix={} pos={} rule={} ({})",
                analysis.label(),
                root,
                suffix,
                pos(tag),
                rule_number,
                rule_tag
            );
            if let Some(strip_rule) = strip_rule {
                line.push_str(&format!(" via {strip_rule}"));
            }
            line
        }
        Analysis::Unknown => analysis.label().to_string(),
    }
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &StemmaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Output in CSV format.
fn output_csv(value: &serde_json::Value, columns: Option<&[&str]>) -> Result<()> {
    for line in csv_lines(value, columns) {
        println!("{line}");
    }
    Ok(())
}

/// Lay a JSON value out as CSV lines.
///
/// With `columns`, array rows are written in that column order; otherwise the
/// first row's keys become the header.
pub fn csv_lines(value: &serde_json::Value, columns: Option<&[&str]>) -> Vec<String> {
    let mut lines = Vec::new();
    match value {
        serde_json::Value::Array(arr) => {
            if let Some(columns) = columns {
                lines.push(columns.join(","));
            }
            for (i, item) in arr.iter().enumerate() {
                let Some(obj) = item.as_object() else {
                    continue;
                };
                let values: Vec<String> = match columns {
                    Some(columns) => columns
                        .iter()
                        .map(|column| obj.get(*column).map(format_csv_value).unwrap_or_default())
                        .collect(),
                    None => {
                        if i == 0 {
                            let headers: Vec<&str> = obj.keys().map(String::as_str).collect();
                            lines.push(headers.join(","));
                        }
                        obj.values().map(format_csv_value).collect()
                    }
                };
                lines.push(values.join(","));
            }
        }
        serde_json::Value::Object(obj) => {
            lines.push("key,value".to_string());
            for (key, value) in obj {
                lines.push(format!("{key},{}", format_csv_value(value)));
            }
        }
        _ => {
            lines.push("value".to_string());
            lines.push(format_csv_value(value));
        }
    }
    lines
}

/// Print YAML value with indentation.
fn print_yaml_value(value: &serde_json::Value, indent: usize) {
    let spaces = "  ".repeat(indent);

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        println!("{spaces}{key}:");
                        print_yaml_value(val, indent + 1);
                    }
                    _ => {
                        let formatted_yaml_val = format_yaml_value(val);
                        println!("{spaces}{key}: {formatted_yaml_val}");
                    }
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                match item {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        println!("{spaces}-");
                        print_yaml_value(item, indent + 1);
                    }
                    _ => {
                        let formatted_yaml_item = format_yaml_value(item);
                        println!("{spaces}- {formatted_yaml_item}");
                    }
                }
            }
        }
        _ => {
            let formatted_yaml_value = format_yaml_value(value);
            println!("{formatted_yaml_value}");
        }
    }
}

/// Format a JSON value for YAML output.
fn format_yaml_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            if s.is_empty() || s.contains(['\n', '"', '\\', ':', '#']) {
                let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
                format!("\"{escaped}\"")
            } else {
                s.clone()
            }
        }
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        _ => "~".to_string(),
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a JSON value for CSV output.
fn format_csv_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                let escaped = s.replace('"', "\"\"");
                format!("\"{escaped}\"")
            } else {
                s.clone()
            }
        }
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join("; ");
            format!("\"[{formatted_values}]\"")
        }
        serde_json::Value::Object(_) => "\"[object]\"".to_string(),
        serde_json::Value::Null => "".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::entry::{DEFAULT_RULE_NUMBER, RuleKind, StripRule};
    use crate::morphology::result::AnalysisResult;

    #[test]
    fn test_describe_analysis() {
        let analysis = Analysis::RootPlusSuffix {
            root: "बनाउ".to_string(),
            suffix: "एका".to_string(),
            pos: None,
            rule_number: "5".to_string(),
            rule_tag: "EKA".to_string(),
            strip_rule: Some(StripRule::new("ाएका", "ाउ")),
        };
        assert_eq!(
            describe_analysis(&analysis),
            "Root + Suffix: root=बनाउ suffix=एका pos=Unknown rule=5 (EKA) via -ाएका +ाउ"
        );
        assert_eq!(describe_analysis(&Analysis::Unknown), "Unknown");
    }

    #[test]
    fn test_text_analysis_csv_rows() {
        let text = TextAnalysis::new(vec![AnalysisResult {
            word: "xyz".to_string(),
            is_root: false,
            analyses: vec![Analysis::Unknown],
        }]);

        let lines = csv_lines(&text.csv_value().unwrap(), text.csv_columns());
        assert_eq!(
            lines,
            vec![
                "word,kind,root,suffix,pos,rule_number,rule_tag".to_string(),
                "xyz,Unknown,-,-,Not found,-,-".to_string(),
            ]
        );
    }

    #[test]
    fn test_csv_lines_without_columns_uses_keys() {
        let value = serde_json::json!([{ "stem": "घर", "word": "घरहरू" }]);
        let lines = csv_lines(&value, None);
        assert_eq!(lines, vec!["stem,word".to_string(), "घर,घरहरू".to_string()]);
    }

    #[test]
    fn test_rule_report_marks_default_rule() {
        let default_rule = TransformationRule::new(
            DEFAULT_RULE_NUMBER,
            RuleKind::Regular,
            1,
            "",
            "DEFAULT",
            false,
            vec![StripRule::new("", "")],
        );
        assert!(RuleReport::new(&default_rule, Vec::new()).is_default);

        let rule = TransformationRule::new(
            1,
            RuleKind::Regular,
            1,
            "हरू",
            "HRU",
            false,
            vec![StripRule::new("हरू", "")],
        );
        let report = RuleReport::new(&rule, vec!["हरू".to_string()]);
        assert!(!report.is_default);
        assert_eq!(report.strip_rules, vec!["-हरू +.".to_string()]);
    }

    #[test]
    fn test_format_csv_value() {
        assert_eq!(
            format_csv_value(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_csv_value(&serde_json::Value::String("a,b".to_string())),
            "\"a,b\""
        );
        assert_eq!(
            format_csv_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_csv_value(&serde_json::Value::Null), "");
    }

    #[test]
    fn test_format_yaml_value() {
        assert_eq!(
            format_yaml_value(&serde_json::Value::String("घर".to_string())),
            "घर"
        );
        assert_eq!(
            format_yaml_value(&serde_json::Value::String("a: b".to_string())),
            "\"a: b\""
        );
        assert_eq!(format_yaml_value(&serde_json::Value::Null), "null");
    }
}
