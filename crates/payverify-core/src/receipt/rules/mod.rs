//! Label-to-field matching rules shared by the receipt extractors.

pub mod dates;
pub mod patterns;

use regex::Regex;

use crate::models::payment::{CanonicalFieldKey, CanonicalFieldSet};

pub use dates::{parse_payment_date, DATE_FORMATS};
pub use patterns::*;

/// Maps a surface label found in a receipt to a canonical field.
///
/// Rule sets are ordered slices: when more than one rule matches a label,
/// the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRule {
    /// Label text as printed on the receipt.
    pub label: &'static str,
    /// Field the paired value is stored in.
    pub key: CanonicalFieldKey,
}

impl LabelRule {
    pub const fn new(label: &'static str, key: CanonicalFieldKey) -> Self {
        Self { label, key }
    }
}

/// How a receipt label is compared with a rule label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-for-byte equality.
    Exact,
    /// Case-insensitive equality, or the label contains the rule label ignoring case.
    ExactOrContains,
}

impl MatchMode {
    pub fn matches(self, label: &str, pattern: &str) -> bool {
        match self {
            MatchMode::Exact => label == pattern,
            MatchMode::ExactOrContains => {
                let label = label.to_lowercase();
                let pattern = pattern.to_lowercase();
                label == pattern || label.contains(&pattern)
            }
        }
    }
}

/// First rule, in declared order, whose label matches.
pub fn find_rule<'r>(rules: &'r [LabelRule], label: &str, mode: MatchMode) -> Option<&'r LabelRule> {
    rules.iter().find(|rule| mode.matches(label, rule.label))
}

/// Trim a table label and drop a trailing colon.
pub fn normalize_label(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(':').unwrap_or(trimmed)
}

/// Trailing segment of a bilingual "Amharic/English" label.
pub fn bilingual_label(raw: &str) -> &str {
    raw.trim().rsplit('/').next().unwrap_or("").trim()
}

/// A rule compiled into a free-text "label: value" pattern.
#[derive(Debug, Clone)]
pub struct TextRule {
    pub rule: LabelRule,
    regex: Regex,
}

impl TextRule {
    pub fn compile(rule: LabelRule) -> Self {
        Self {
            rule,
            regex: label_value_pattern(rule.label),
        }
    }

    /// Trimmed value following the label, if the text contains one.
    pub fn capture(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// Compile every rule of a rule set, keeping the declared order.
pub fn compile_text_rules(rules: &[LabelRule]) -> Vec<TextRule> {
    rules.iter().copied().map(TextRule::compile).collect()
}

/// Apply the first matching rule to a label/value pair, keeping any existing value.
///
/// Returns the rule that claimed the label, even if its field was already set.
pub fn fill_first_match<'r>(
    fields: &mut CanonicalFieldSet,
    rules: &'r [LabelRule],
    label: &str,
    value: &str,
    mode: MatchMode,
) -> Option<&'r LabelRule> {
    let rule = find_rule(rules, label, mode)?;
    fields.fill(rule.key, value);
    Some(rule)
}
