//! TeleBirr HTML receipts. Also used for providers without a dedicated layout.

use scraper::ElementRef;
use tracing::{debug, trace};

use super::ProviderExtractor;
use crate::html::{cells, element_text, next_element, trimmed_text, CellKind, HtmlDocument};
use crate::models::payment::{CanonicalFieldKey, CanonicalFieldSet};
use crate::receipt::rules::{bilingual_label, find_rule, LabelRule, MatchMode};

use CanonicalFieldKey::*;

/// English halves of the bilingual TeleBirr labels. Matched exactly.
pub const TELEBIRR_RULES: &[LabelRule] = &[
    LabelRule::new("Payer Name", PayerName),
    LabelRule::new("Payment Mode", PaymentMode),
    LabelRule::new("Payment Reason", PaymentReason),
    LabelRule::new("Payment date", PaymentDate),
    LabelRule::new("Invoice No.", InvoiceNo),
    LabelRule::new("Total Paid Amount", TotalPaidAmount),
    LabelRule::new("transaction status", Status),
    LabelRule::new("Credited Party name", CreditedPartyName),
    LabelRule::new("Credited party account no", CreditedPartyAccountNo),
];

const INVOICE_HEADER: &str = "Invoice No.";

fn is_invoice_header(row: ElementRef<'_>) -> bool {
    let tds = cells(row, CellKind::Data);
    tds.len() == 3 && element_text(tds[0]).trim().contains(INVOICE_HEADER)
}

/// Extractor for TeleBirr receipt pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeleBirrExtractor;

impl TeleBirrExtractor {
    /// Read the "Invoice No. | Payment date | Amount" table.
    ///
    /// Only the first header row is read. Returns the data row that was consumed.
    fn extract_invoice_block<'a>(
        &self,
        doc: &'a HtmlDocument,
        fields: &mut CanonicalFieldSet,
    ) -> Option<ElementRef<'a>> {
        let header = doc.rows().find(|row| is_invoice_header(*row))?;
        let data_row = next_element(header)?;

        let values = cells(data_row, CellKind::Data);
        if values.len() < 3 {
            return None;
        }
        fields.set(InvoiceNo, trimmed_text(values[0]));
        fields.set(PaymentDate, trimmed_text(values[1]));
        fields.set(TotalPaidAmount, trimmed_text(values[2]));
        debug!("Read TeleBirr invoice block: {}", fields.invoice_no);

        Some(data_row)
    }

    /// Label/value rows. A later row for the same field replaces an earlier one.
    ///
    /// Invoice header rows and the consumed invoice data row carry column
    /// titles and values rather than labels, so they are skipped.
    fn extract_label_rows(
        &self,
        doc: &HtmlDocument,
        invoice_row: Option<ElementRef<'_>>,
        fields: &mut CanonicalFieldSet,
    ) {
        for row in doc.rows() {
            if is_invoice_header(row) || invoice_row == Some(row) {
                continue;
            }
            let tds = cells(row, CellKind::Data);
            if tds.len() < 2 {
                continue;
            }

            let raw = element_text(tds[0]);
            let label = bilingual_label(&raw);
            if let Some(rule) = find_rule(TELEBIRR_RULES, label, MatchMode::Exact) {
                trace!("row {:?} -> {}", label, rule.key);
                fields.set(rule.key, trimmed_text(tds[1]));
            }
        }
    }
}

impl ProviderExtractor for TeleBirrExtractor {
    fn extract(&self, doc: &HtmlDocument) -> CanonicalFieldSet {
        let mut fields = CanonicalFieldSet::new();

        let invoice_row = self.extract_invoice_block(doc, &mut fields);
        self.extract_label_rows(doc, invoice_row, &mut fields);

        fields
    }
}
