//! Error types for the payverify-core library.

use thiserror::Error;

/// Errors from loading and saving the application configuration.
#[derive(Error, Debug)]
pub enum PayverifyError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid.
    #[error("invalid configuration in {path}: {reason}")]
    Config { path: String, reason: String },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF container.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// A single page could not be decoded to text.
    #[error("failed to extract text from page {page}: {reason}")]
    PageText { page: u32, reason: String },

    /// Failed to extract text from the whole document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised by payment stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing file.
    #[error("failed to open store at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a record.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write to the store.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type for the payverify library.
pub type Result<T> = std::result::Result<T, PayverifyError>;
