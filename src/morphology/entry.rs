//! Entries of the root, suffix and rule tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rule number of the catch-all default rule.
pub const DEFAULT_RULE_NUMBER: u32 = 9998;

/// A known root word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntry {
    /// Canonical spelling of the root.
    pub text: String,
    /// Part-of-speech tag (`NN`, `VF`, `ADJ`, `PPG`, `CCON`, ...).
    pub pos: Option<String>,
    /// Suffix lexically bound to this particular root.
    pub bound_suffix: Option<String>,
}

impl RootEntry {
    /// Create a root entry without POS or bound suffix.
    pub fn new<S: Into<String>>(text: S) -> Self {
        RootEntry {
            text: text.into(),
            pos: None,
            bound_suffix: None,
        }
    }

    /// Set the part-of-speech tag.
    pub fn with_pos<S: Into<String>>(mut self, pos: S) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Set the bound suffix.
    pub fn with_bound_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.bound_suffix = Some(suffix.into());
        self
    }
}

/// A known inflectional suffix and the rule it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixEntry {
    /// Suffix spelling.
    pub text: String,
    /// Key into the rule table, kept verbatim. Non-numeric keys never resolve.
    pub rule_number: String,
}

impl SuffixEntry {
    pub fn new<S: Into<String>, R: Into<String>>(text: S, rule_number: R) -> Self {
        SuffixEntry {
            text: text.into(),
            rule_number: rule_number.into(),
        }
    }

    /// The rule number as an integer, if it is one.
    pub fn rule_key(&self) -> Option<u32> {
        self.rule_number.trim().parse().ok()
    }
}

/// Kind of a transformation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Character-level substitution (`SFX`).
    Regular,
    /// Opaque pattern (`SFXX`); carries no strip rules.
    Irregular,
}

impl RuleKind {
    /// Parse the kind column of a rule header.
    ///
    /// Anything other than `SFX` is treated as irregular.
    pub fn from_token(token: &str) -> Self {
        if token == "SFX" {
            RuleKind::Regular
        } else {
            RuleKind::Irregular
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Regular => f.write_str("SFX"),
            RuleKind::Irregular => f.write_str("SFXX"),
        }
    }
}

/// One delete/insert edit at the end of a word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StripRule {
    /// Substring removed from the end of the word. May be empty.
    pub delete: String,
    /// Substring appended after the deletion. May be empty.
    pub insert: String,
}

impl StripRule {
    pub fn new<D: Into<String>, I: Into<String>>(delete: D, insert: I) -> Self {
        StripRule {
            delete: delete.into(),
            insert: insert.into(),
        }
    }

    /// Apply the edit to `word`.
    ///
    /// Returns `None` when `word` does not end with the delete pattern.
    pub fn apply(&self, word: &str) -> Option<String> {
        let stem = word.strip_suffix(self.delete.as_str())?;
        let mut rebuilt = String::with_capacity(stem.len() + self.insert.len());
        rebuilt.push_str(stem);
        rebuilt.push_str(&self.insert);
        Some(rebuilt)
    }

    fn delete_len(&self) -> usize {
        self.delete.chars().count()
    }
}

impl fmt::Display for StripRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |s: &str| if s.is_empty() { ".".to_string() } else { s.to_string() };
        write!(f, "-{} +{}", show(&self.delete), show(&self.insert))
    }
}

/// A transformation rule from the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRule {
    pub number: u32,
    pub kind: RuleKind,
    /// Number of sub-rule lines declared by the header.
    pub sub_rule_count: usize,
    /// Suffix spelling this rule is documented against.
    pub morph_form: String,
    /// Transliterated label such as `HRU` or `LAI`.
    pub tag: String,
    /// Callers running a second pass over unresolved words may skip this rule.
    pub ignore_in_second_pass: bool,
    strip_rules: Vec<StripRule>,
}

impl TransformationRule {
    /// Build a rule. Strip rules are reordered longest `delete` first; rules
    /// with equally long patterns keep their table order.
    pub fn new(
        number: u32,
        kind: RuleKind,
        sub_rule_count: usize,
        morph_form: impl Into<String>,
        tag: impl Into<String>,
        ignore_in_second_pass: bool,
        mut strip_rules: Vec<StripRule>,
    ) -> Self {
        strip_rules.sort_by_key(|rule| std::cmp::Reverse(rule.delete_len()));
        TransformationRule {
            number,
            kind,
            sub_rule_count,
            morph_form: morph_form.into(),
            tag: tag.into(),
            ignore_in_second_pass,
            strip_rules,
        }
    }

    /// Strip rules, longest `delete` pattern first.
    pub fn strip_rules(&self) -> &[StripRule] {
        &self.strip_rules
    }

    pub fn is_regular(&self) -> bool {
        self.kind == RuleKind::Regular
    }

    pub fn is_default(&self) -> bool {
        self.number == DEFAULT_RULE_NUMBER
    }
}

/// Parse the `ignoreFlag` column of a rule header.
pub fn parse_flag(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "1" | "y" | "yes" | "t" | "true"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_rule_apply() {
        let rule = StripRule::new("ाएका", "ाउ");
        assert_eq!(rule.apply("बनाएका").as_deref(), Some("बनाउ"));
        assert_eq!(rule.apply("घरहरू"), None);

        let empty = StripRule::new("", "");
        assert_eq!(empty.apply("घर").as_deref(), Some("घर"));
    }

    #[test]
    fn test_strip_rules_longest_delete_first() {
        let rule = TransformationRule::new(
            5,
            RuleKind::Regular,
            4,
            "एका",
            "EKA",
            false,
            vec![
                StripRule::new("का", ""),
                StripRule::new("ाएका", "ाउ"),
                StripRule::new("एका", ""),
                StripRule::new("xका", "y"),
            ],
        );

        let deletes: Vec<&str> = rule.strip_rules().iter().map(|r| r.delete.as_str()).collect();
        assert_eq!(deletes, vec!["ाएका", "एका", "xका", "का"]);
    }

    #[test]
    fn test_rule_kind_from_token() {
        assert_eq!(RuleKind::from_token("SFX"), RuleKind::Regular);
        assert_eq!(RuleKind::from_token("SFXX"), RuleKind::Irregular);
        assert_eq!(RuleKind::from_token("PFX"), RuleKind::Irregular);
        assert_eq!(RuleKind::Regular.to_string(), "SFX");
    }

    #[test]
    fn test_suffix_rule_key() {
        assert_eq!(SuffixEntry::new("हरू", "1").rule_key(), Some(1));
        assert_eq!(SuffixEntry::new("लाई", "abc").rule_key(), None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("Yes"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("N"));
    }

    #[test]
    fn test_strip_rule_display() {
        assert_eq!(StripRule::new("हरू", "").to_string(), "-हरू +.");
    }
}
