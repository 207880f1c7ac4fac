//! Core library for payment receipt verification.
//!
//! This crate provides:
//! - Content classification of fetched receipts (PDF or HTML)
//! - PDF text extraction with per-page failure tolerance
//! - Provider-specific field extraction (CBE, TeleBirr)
//! - Payment date normalization
//! - Payment record models and a file-backed payment store

pub mod document;
pub mod error;
pub mod html;
pub mod models;
pub mod pdf;
pub mod receipt;
pub mod store;

pub use document::ContentKind;
pub use error::{PayverifyError, Result};
pub use models::payment::{CanonicalFieldKey, CanonicalFieldSet, PaymentRecord, Provider, ProviderKind};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use receipt::{extract_payment_data, ExtractionResult, ReceiptParser};
pub use receipt::rules::dates::parse_payment_date;
pub use store::{JsonLinesStore, PaymentStore};
