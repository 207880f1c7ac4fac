//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CBE transfer reference, e.g. FT25311ABCDE
    pub static ref FT_REFERENCE: Regex = Regex::new(
        r"FT\d{7}[A-Z0-9]+"
    ).unwrap();
}

/// Case-insensitive "label[:-] value" pattern capturing the rest of the line.
pub fn label_value_pattern(label: &str) -> Regex {
    let pattern = format!(r"(?i){}\s*[:\-]?\s*(.+)", regex::escape(label));
    // The label is escaped, so the pattern is always valid.
    Regex::new(&pattern).unwrap()
}
