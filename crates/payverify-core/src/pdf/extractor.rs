//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Extracted text content from a PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfContent {
    /// Text of all readable pages, in page order, each followed by a newline.
    pub text: String,
    /// Pages that were decoded.
    pub pages: Vec<PdfPage>,
    /// Page numbers that could not be decoded and were skipped.
    pub skipped_pages: Vec<u32>,
}

impl PdfContent {
    /// The document text as an ordered sequence of lines.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Create an extractor and load the given bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        Ok(extractor)
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Whole-document decode, used when no page could be decoded on its own.
    fn extract_text_fallback(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_all(&self) -> Result<PdfContent> {
        let doc = self.document()?;
        let mut content = PdfContent::default();

        for page_num in doc.get_pages().keys().copied() {
            match self.extract_page_text(page_num) {
                Ok(text) => {
                    content.text.push_str(&text);
                    content.text.push('\n');
                    content.pages.push(PdfPage {
                        number: page_num,
                        text,
                    });
                }
                Err(e) => {
                    warn!("Skipping page {}: {}", page_num, e);
                    content.skipped_pages.push(page_num);
                }
            }
        }

        if content.pages.is_empty() && !content.skipped_pages.is_empty() {
            match self.extract_text_fallback() {
                Ok(text) => {
                    debug!("Recovered {} chars with whole-document decode", text.len());
                    content.text = text;
                }
                Err(e) => warn!("Whole-document decode failed: {}", e),
            }
        }

        debug!(
            "PDF text: {} pages decoded, {} skipped, {} chars",
            content.pages.len(),
            content.skipped_pages.len(),
            content.text.len()
        );

        Ok(content)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page]).map_err(|e| PdfError::PageText {
            page,
            reason: e.to_string(),
        })
    }
}
