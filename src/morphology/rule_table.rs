//! Parser for the transformation rule table.
//!
//! The table is a stream of records. Each record is a header line
//!
//! ```text
//! number kind subRuleCount morphForm tag ignoreFlag
//! ```
//!
//! followed by `subRuleCount` lines of `delete insert`. A field consisting
//! of only the placeholder character (`.` by default) stands for an empty
//! field; a placeholder inside a longer field is kept as written.
//!
//! Parsing happens in two steps. The non-blank lines are first split into
//! [`RuleRecord`]s, then each record is turned into a [`TransformationRule`].
//! When a header is malformed its sub-rule count is unknown, so the splitter
//! drops lines until the next line that reads as a valid header instead of
//! guessing. Likewise a body never swallows a valid header: if the declared
//! count runs past the next header, the body ends early.

use log::{debug, warn};

use crate::error::{ParseError, Table};
use crate::morphology::entry::{RuleKind, StripRule, TransformationRule, parse_flag};
use crate::morphology::lexicon::Parsed;

/// Placeholder for an empty `delete` or `insert` field.
pub const DEFAULT_PLACEHOLDER: char = '.';

const HEADER_FIELDS: usize = 6;

/// A parsed rule header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHeader {
    pub number: u32,
    pub kind: RuleKind,
    pub sub_rule_count: usize,
    pub morph_form: String,
    pub tag: String,
    pub ignore_in_second_pass: bool,
}

/// A header together with the body lines collected for it.
#[derive(Debug, Clone)]
pub struct RuleRecord<'a> {
    pub header: RuleHeader,
    /// Line number of the header (1-based).
    pub line: usize,
    /// Body lines with their line numbers.
    pub body: Vec<(usize, &'a str)>,
}

/// Parse a header line. Extra fields after the sixth are ignored.
pub fn parse_header(line: &str) -> Result<RuleHeader, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < HEADER_FIELDS {
        return Err(format!(
            "rule header needs {HEADER_FIELDS} fields, found {}",
            fields.len()
        ));
    }

    let number = fields[0]
        .parse::<u32>()
        .map_err(|_| format!("invalid rule number '{}'", fields[0]))?;
    let sub_rule_count = fields[2]
        .parse::<usize>()
        .map_err(|_| format!("invalid sub-rule count '{}'", fields[2]))?;

    Ok(RuleHeader {
        number,
        kind: RuleKind::from_token(fields[1]),
        sub_rule_count,
        morph_form: fields[3].to_string(),
        tag: fields[4].to_string(),
        ignore_in_second_pass: parse_flag(fields[5]),
    })
}

/// Parse a `delete insert` body line.
pub fn parse_strip_line(line: &str, placeholder: char) -> Result<StripRule, String> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(delete), Some(insert)) => Ok(StripRule::new(
            unplaceholder(delete, placeholder),
            unplaceholder(insert, placeholder),
        )),
        _ => Err("sub-rule needs 'delete insert'".to_string()),
    }
}

fn unplaceholder(field: &str, placeholder: char) -> &str {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c == placeholder => "",
        _ => field,
    }
}

/// Split the rule table into header + body records.
///
/// Lines that cannot belong to any record are reported in `errors`.
pub fn split_records(text: &str) -> (Vec<RuleRecord<'_>>, Vec<ParseError>) {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let mut records = Vec::new();
    let mut errors = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let (line_no, line) = lines[cursor];
        cursor += 1;

        let header = match parse_header(line) {
            Ok(header) => header,
            Err(reason) => {
                errors.push(ParseError::new(Table::Rules, line_no, reason));
                // Resynchronize on the next valid header.
                while cursor < lines.len() && parse_header(lines[cursor].1).is_err() {
                    let (orphan_no, _) = lines[cursor];
                    errors.push(ParseError::new(
                        Table::Rules,
                        orphan_no,
                        "line does not belong to any rule",
                    ));
                    cursor += 1;
                }
                continue;
            }
        };

        let mut body = Vec::with_capacity(header.sub_rule_count);
        while body.len() < header.sub_rule_count && cursor < lines.len() {
            if parse_header(lines[cursor].1).is_ok() {
                break;
            }
            body.push(lines[cursor]);
            cursor += 1;
        }

        if body.len() < header.sub_rule_count {
            errors.push(ParseError::new(
                Table::Rules,
                line_no,
                format!(
                    "rule {} declares {} sub-rules, found {}",
                    header.number,
                    header.sub_rule_count,
                    body.len()
                ),
            ));
        }

        records.push(RuleRecord {
            header,
            line: line_no,
            body,
        });
    }

    (records, errors)
}

/// Parse the whole rule table, in table order. Duplicate rule numbers are
/// kept here; the repository applies the override policy.
pub fn parse_rules(text: &str, placeholder: char) -> Parsed<TransformationRule> {
    let (records, errors) = split_records(text);
    let mut parsed = Parsed::default();
    for error in errors {
        parsed.reject(error);
    }

    for record in records {
        let header = record.header;
        let mut strip_rules = Vec::with_capacity(record.body.len());

        match header.kind {
            RuleKind::Regular => {
                for (line_no, line) in record.body {
                    match parse_strip_line(line, placeholder) {
                        Ok(strip_rule) => strip_rules.push(strip_rule),
                        Err(reason) => {
                            parsed.reject(ParseError::new(Table::Rules, line_no, reason))
                        }
                    }
                }
            }
            RuleKind::Irregular => {
                debug!(
                    "Rule {} (line {}) is irregular; {} sub-rule lines left unparsed",
                    header.number,
                    record.line,
                    record.body.len()
                );
            }
        }

        parsed.entries.push(TransformationRule::new(
            header.number,
            header.kind,
            header.sub_rule_count,
            header.morph_form,
            header.tag,
            header.ignore_in_second_pass,
            strip_rules,
        ));
    }

    if parsed.entries.is_empty() && !text.trim().is_empty() {
        warn!("Rule table contained no valid rule headers");
    }
    parsed
}
