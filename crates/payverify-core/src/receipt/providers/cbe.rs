//! Commercial Bank of Ethiopia (CBE) HTML receipts.
//!
//! Three passes write into the same field set and never overwrite a value,
//! so pass order is priority order:
//! 1. two-cell `td` rows,
//! 2. `th`/`td` rows,
//! 3. free "Label: value" text in `div`, `span` and `p` elements.
//!
//! A status word anywhere on the page is the last resort for `status`.

use lazy_static::lazy_static;
use tracing::{debug, trace};

use super::ProviderExtractor;
use crate::html::{cells, element_text, trimmed_text, CellKind, HtmlDocument};
use crate::models::payment::{CanonicalFieldKey, CanonicalFieldSet};
use crate::receipt::rules::{
    compile_text_rules, fill_first_match, normalize_label, LabelRule, MatchMode, TextRule,
};

use CanonicalFieldKey::*;

/// CBE labels in priority order. Longer labels come before labels they
/// contain, and account labels before name labels, since matching is by
/// substring and the first matching rule claims a cell.
pub const CBE_RULES: &[LabelRule] = &[
    LabelRule::new("Transaction Reference", InvoiceNo),
    LabelRule::new("Txn Reference", InvoiceNo),
    LabelRule::new("Reference", InvoiceNo),
    LabelRule::new("Transaction Amount", TotalPaidAmount),
    LabelRule::new("Amount", TotalPaidAmount),
    LabelRule::new("Beneficiary Account", CreditedPartyAccountNo),
    LabelRule::new("Account Number", CreditedPartyAccountNo),
    LabelRule::new("Payer Name", PayerName),
    LabelRule::new("Sender Name", PayerName),
    LabelRule::new("Payer", PayerName),
    LabelRule::new("Sender", PayerName),
    LabelRule::new("Beneficiary Name", CreditedPartyName),
    LabelRule::new("Receiver Name", CreditedPartyName),
    LabelRule::new("Beneficiary", CreditedPartyName),
    LabelRule::new("Receiver", CreditedPartyName),
    LabelRule::new("Transaction Date", PaymentDate),
    LabelRule::new("Value Date", PaymentDate),
    LabelRule::new("Date", PaymentDate),
    LabelRule::new("Transaction Status", Status),
    LabelRule::new("Status", Status),
    LabelRule::new("Payment Type", PaymentMode),
    LabelRule::new("Transaction Type", PaymentMode),
    LabelRule::new("Reason", PaymentReason),
    LabelRule::new("Narration", PaymentReason),
    LabelRule::new("Remark", PaymentReason),
];

lazy_static! {
    static ref CBE_TEXT_RULES: Vec<TextRule> = compile_text_rules(CBE_RULES);
}

/// Status words searched for in the page text, in priority order.
const STATUS_WORDS: &[(&str, &str)] = &[
    ("successful", "Successful"),
    ("success", "Successful"),
    ("pending", "Pending"),
    ("failed", "Failed"),
];

/// Extractor for CBE receipt pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct CbeExtractor;

impl CbeExtractor {
    fn extract_data_rows(&self, doc: &HtmlDocument, fields: &mut CanonicalFieldSet) {
        for row in doc.rows() {
            let tds = cells(row, CellKind::Data);
            if tds.len() < 2 {
                continue;
            }
            let raw = element_text(tds[0]);
            let label = normalize_label(&raw);
            let value = trimmed_text(tds[1]);

            if let Some(rule) = fill_first_match(fields, CBE_RULES, label, &value, MatchMode::ExactOrContains) {
                trace!("td row {:?} -> {}", label, rule.key);
            }
        }
    }

    fn extract_header_rows(&self, doc: &HtmlDocument, fields: &mut CanonicalFieldSet) {
        for row in doc.rows() {
            let ths = cells(row, CellKind::Header);
            let tds = cells(row, CellKind::Data);
            let (Some(th), Some(td)) = (ths.first(), tds.first()) else {
                continue;
            };
            let raw = element_text(*th);
            let label = normalize_label(&raw);
            let value = trimmed_text(*td);

            if let Some(rule) = fill_first_match(fields, CBE_RULES, label, &value, MatchMode::ExactOrContains) {
                trace!("th row {:?} -> {}", label, rule.key);
            }
        }
    }

    fn extract_text_blocks(&self, doc: &HtmlDocument, fields: &mut CanonicalFieldSet) {
        for element in doc.text_containers() {
            let text = element_text(element);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            for rule in CBE_TEXT_RULES.iter() {
                if fields.is_set(rule.rule.key) {
                    continue;
                }
                if let Some(value) = rule.capture(text) {
                    trace!("text {:?} -> {}", rule.rule.label, rule.rule.key);
                    fields.fill(rule.rule.key, value);
                }
            }
        }
    }

    fn infer_status(&self, doc: &HtmlDocument, fields: &mut CanonicalFieldSet) {
        if fields.is_set(Status) {
            return;
        }
        let text = doc.text().to_lowercase();
        if let Some((_, status)) = STATUS_WORDS.iter().find(|(word, _)| text.contains(word)) {
            debug!("Status inferred from page text: {}", status);
            fields.set(Status, *status);
        }
    }
}

impl ProviderExtractor for CbeExtractor {
    fn extract(&self, doc: &HtmlDocument) -> CanonicalFieldSet {
        let mut fields = CanonicalFieldSet::new();

        self.extract_data_rows(doc, &mut fields);
        self.extract_header_rows(doc, &mut fields);
        self.extract_text_blocks(doc, &mut fields);
        self.infer_status(doc, &mut fields);

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(html: &str) -> CanonicalFieldSet {
        CbeExtractor.extract(&HtmlDocument::parse_str(html))
    }

    #[test]
    fn test_two_cell_rows() {
        let fields = extract(
            r#"<table>
                <tr><td>Payer Name:</td><td> ABEBE KEBEDE </td></tr>
                <tr><td>Transaction Amount</td><td>1,500.00 ETB</td></tr>
                <tr><td>Txn Reference:</td><td>FT25311ABCDE</td></tr>
                <tr><td>Beneficiary Account</td><td>1000****1234</td></tr>
                <tr><td>Beneficiary Name</td><td>SELAM TRADING</td></tr>
                <tr><td>Transaction Status</td><td>Completed</td></tr>
            </table>"#,
        );

        assert_eq!(fields.payer_name, "ABEBE KEBEDE");
        assert_eq!(fields.total_paid_amount, "1,500.00 ETB");
        assert_eq!(fields.invoice_no, "FT25311ABCDE");
        assert_eq!(fields.credited_party_account_no, "1000****1234");
        assert_eq!(fields.credited_party_name, "SELAM TRADING");
        assert_eq!(fields.status, "Completed");
    }

    #[test]
    fn test_payer_account_label_is_a_payer_label() {
        let fields = extract(r#"<table><tr><td>Payer Account</td><td>1000123</td></tr></table>"#);
        assert_eq!(fields.payer_name, "1000123");
        assert_eq!(fields.payer_account_no, "");
    }

    #[test]
    fn test_case_insensitive_substring_label() {
        let fields = extract(r#"<table><tr><td>THE SENDER NAME OF RECORD</td><td>Abebe</td></tr></table>"#);
        assert_eq!(fields.payer_name, "Abebe");
    }

    #[test]
    fn test_first_row_wins() {
        let fields = extract(
            r#"<table>
                <tr><td>Payer</td><td>First</td></tr>
                <tr><td>Sender Name</td><td>Second</td></tr>
            </table>"#,
        );
        assert_eq!(fields.payer_name, "First");
    }

    #[test]
    fn test_data_rows_beat_header_rows() {
        let fields = extract(
            r#"<table>
                <tr><th>Payer</th><td>From header row</td></tr>
                <tr><td>Payer</td><td>From data row</td></tr>
                <tr><th>Reason</th><td>Rent</td></tr>
            </table>"#,
        );
        assert_eq!(fields.payer_name, "From data row");
        assert_eq!(fields.payment_reason, "Rent");
    }

    #[test]
    fn test_header_rows_beat_free_text() {
        let fields = extract(
            r#"<table><tr><th>Value Date:</th><td>1/6/2026, 12:44:00 PM</td></tr></table>
               <p>Date: 2/2/2026, 1:00:00 PM</p>"#,
        );
        assert_eq!(fields.payment_date.as_deref(), Some("1/6/2026, 12:44:00 PM"));
    }

    #[test]
    fn test_free_text_blocks() {
        let fields = extract(
            r#"<div class="receipt">
                 <p>Narration: School fee</p>
                 <span>Payment Type - Transfer</span>
               </div>"#,
        );
        assert_eq!(fields.payment_reason, "School fee");
        assert_eq!(fields.payment_mode, "Transfer");
    }

    #[test]
    fn test_status_from_page_text() {
        let fields = extract("<html><body><h1>Transaction SUCCESSFUL</h1></body></html>");
        assert_eq!(fields.status, "Successful");

        let fields = extract("<html><body><h1>Payment pending review</h1></body></html>");
        assert_eq!(fields.status, "Pending");

        let fields = extract("<html><body><h1>Payment FAILED</h1></body></html>");
        assert_eq!(fields.status, "Failed");

        let fields = extract("<html><body><h1>Receipt</h1></body></html>");
        assert_eq!(fields.status, "");
    }

    #[test]
    fn test_explicit_status_not_replaced() {
        let fields = extract(
            r#"<table><tr><td>Status</td><td>Reversed</td></tr></table><p>successful</p>"#,
        );
        assert_eq!(fields.status, "Reversed");
    }
}
