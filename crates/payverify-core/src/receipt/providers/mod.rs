//! Provider-specific receipt layouts.

pub mod cbe;
pub mod pdf;
pub mod telebirr;

pub use cbe::CbeExtractor;
pub use pdf::extract_from_lines;
pub use telebirr::TeleBirrExtractor;

use crate::html::HtmlDocument;
use crate::models::payment::{CanonicalFieldSet, ProviderKind};

/// Trait for HTML receipt extractors.
pub trait ProviderExtractor {
    /// Extract canonical fields from a parsed receipt page.
    fn extract(&self, doc: &HtmlDocument) -> CanonicalFieldSet;
}

/// Run the extractor for the provider's layout.
pub fn extract_html(provider: ProviderKind, doc: &HtmlDocument) -> CanonicalFieldSet {
    match provider.layout() {
        ProviderKind::Cbe => CbeExtractor.extract(doc),
        ProviderKind::TeleBirr | ProviderKind::Default => TeleBirrExtractor.extract(doc),
    }
}
