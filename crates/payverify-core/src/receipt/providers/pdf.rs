//! PDF receipts, read as label/value line pairs.
//!
//! The CBE PDF receipt prints each label on its own line with the value on the
//! next one. Payer and receiver blocks are four lines long:
//!
//! ```text
//! Payer
//! ABEBE KEBEDE
//! Account
//! 1****1234
//! ```

use tracing::debug;

use crate::models::payment::{CanonicalFieldKey, CanonicalFieldSet};
use crate::receipt::rules::{find_rule, LabelRule, MatchMode, FT_REFERENCE};

use CanonicalFieldKey::*;

pub const PDF_RULES: &[LabelRule] = &[
    LabelRule::new("Payer", PayerName),
    LabelRule::new("Receiver", CreditedPartyName),
    LabelRule::new("Payment Date & Time", PaymentDate),
    LabelRule::new("Reference No. (VAT Invoice No)", InvoiceNo),
    LabelRule::new("Reason / Type of service", PaymentReason),
    LabelRule::new("Transferred Amount", TotalPaidAmount),
];

const ACCOUNT_LABEL: &str = "Account";
const AMOUNT_SUFFIX: &str = " ETB";
const DEFAULT_STATUS: &str = "Successful";

/// Extract fields from the text lines of a PDF receipt. Earlier label matches
/// win; an `Account` line always takes the latest value for its block.
pub fn extract_from_lines<S: AsRef<str>>(lines: &[S]) -> CanonicalFieldSet {
    let mut fields = CanonicalFieldSet::new();

    for i in 0..lines.len().saturating_sub(1) {
        let label = lines[i].as_ref().trim();
        let value = lines[i + 1].as_ref().trim();

        if let Some(rule) = find_rule(PDF_RULES, label, MatchMode::Exact) {
            let value = if rule.key == TotalPaidAmount {
                value.strip_suffix(AMOUNT_SUFFIX).unwrap_or(value)
            } else {
                value
            };
            fields.fill(rule.key, value);
        }

        if label == ACCOUNT_LABEL && i >= 2 {
            match lines[i - 2].as_ref().trim() {
                "Payer" => fields.set(PayerAccountNo, value),
                "Receiver" => fields.set(CreditedPartyAccountNo, value),
                _ => {}
            }
        }
    }

    if !fields.is_set(InvoiceNo) {
        let text = lines.iter().map(|line| line.as_ref()).collect::<Vec<&str>>().join(" ");
        if let Some(reference) = FT_REFERENCE.find(&text) {
            debug!("Using FT reference {} as invoice number", reference.as_str());
            fields.set(InvoiceNo, reference.as_str());
        }
    }

    // Parseable receipts of this family are completed transfers.
    if !fields.is_set(Status) {
        fields.set(Status, DEFAULT_STATUS);
    }

    fields
}
