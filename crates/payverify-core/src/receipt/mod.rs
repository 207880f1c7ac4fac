//! Receipt field extraction module.

mod parser;
pub mod providers;
pub mod rules;

pub use parser::{extract_payment_data, ExtractionResult, ReceiptParser};
pub use providers::ProviderExtractor;
