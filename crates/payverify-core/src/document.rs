//! Receipt content classification.

use serde::{Deserialize, Serialize};

/// Signature every PDF container starts with.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Kind of receipt content returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// PDF document.
    Pdf,
    /// HTML page (anything that is not a PDF).
    Html,
}

impl ContentKind {
    /// Classify content by its byte prefix.
    pub fn sniff(content: &[u8]) -> Self {
        if content.starts_with(PDF_MAGIC) {
            ContentKind::Pdf
        } else {
            ContentKind::Html
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_pdf() {
        assert_eq!(ContentKind::sniff(b"%PDF-1.7\n..."), ContentKind::Pdf);
    }

    #[test]
    fn test_sniff_html() {
        assert_eq!(ContentKind::sniff(b"<html><body></body></html>"), ContentKind::Html);
        assert_eq!(ContentKind::sniff(b""), ContentKind::Html);
        // Signature must be at the very start.
        assert_eq!(ContentKind::sniff(b" %PDF-1.4"), ContentKind::Html);
        assert_eq!(ContentKind::sniff(b"%PD"), ContentKind::Html);
    }
}
