//! Receipt parser: classifies the content and runs the matching extractor.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::document::ContentKind;
use crate::html::HtmlDocument;
use crate::models::payment::{CanonicalFieldKey, CanonicalFieldSet, ProviderKind};
use crate::pdf::{PdfExtractor, PdfProcessor};

use super::providers::{extract_from_lines, extract_html};

/// Result of a receipt extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted fields. Always full-shape, possibly empty.
    pub fields: CanonicalFieldSet,
    /// How the content was classified.
    pub content_kind: ContentKind,
    /// Provider layout that was applied.
    pub provider: ProviderKind,
    /// Degradations met along the way (skipped pages, unreadable content).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Extracts canonical payment fields from fetched receipt content.
///
/// Parsing never fails. Content that cannot be read yields an empty field set
/// and a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptParser;

impl ReceiptParser {
    /// Create a new receipt parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse receipt content for the named provider.
    pub fn parse(&self, content: &[u8], provider_name: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let content_kind = ContentKind::sniff(content);
        let provider = ProviderKind::from_name(provider_name);

        info!(
            "Parsing {} bytes of {:?} content for provider {:?}",
            content.len(),
            content_kind,
            provider
        );

        let fields = match content_kind {
            ContentKind::Pdf => self.parse_pdf(content, &mut warnings),
            ContentKind::Html => self.parse_html(content, provider, &mut warnings),
        };

        let processing_time_ms = start.elapsed().as_millis() as u64;
        let found = CanonicalFieldKey::ALL.len() - fields.missing().len();
        debug!("Extracted {} fields in {} ms", found, processing_time_ms);

        ExtractionResult {
            fields,
            content_kind,
            provider,
            warnings,
            processing_time_ms,
        }
    }

    fn parse_pdf(&self, content: &[u8], warnings: &mut Vec<String>) -> CanonicalFieldSet {
        let extractor = match PdfExtractor::from_bytes(content) {
            Ok(extractor) => extractor,
            Err(e) => {
                warn!("Could not open PDF receipt: {}", e);
                warnings.push(format!("Could not open PDF: {}", e));
                return CanonicalFieldSet::new();
            }
        };

        let pdf = match extractor.extract_all() {
            Ok(pdf) => pdf,
            Err(e) => {
                warn!("Could not read PDF text: {}", e);
                warnings.push(format!("Could not read PDF text: {}", e));
                return CanonicalFieldSet::new();
            }
        };

        for page in &pdf.skipped_pages {
            warnings.push(format!("Skipped unreadable page {}", page));
        }

        let lines = pdf.lines();
        debug!("PDF receipt has {} lines", lines.len());
        extract_from_lines(&lines)
    }

    fn parse_html(
        &self,
        content: &[u8],
        provider: ProviderKind,
        warnings: &mut Vec<String>,
    ) -> CanonicalFieldSet {
        let doc = HtmlDocument::parse(content);
        if doc.is_lossy() {
            warn!("Receipt page is not valid UTF-8");
            warnings.push("Replaced invalid UTF-8 sequences in page".to_string());
        }
        extract_html(provider, &doc)
    }
}

/// Extract the canonical fields of a receipt.
pub fn extract_payment_data(content: impl AsRef<[u8]>, provider_name: &str) -> CanonicalFieldSet {
    ReceiptParser::new().parse(content.as_ref(), provider_name).fields
}
