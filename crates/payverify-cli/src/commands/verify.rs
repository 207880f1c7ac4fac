//! Verify command - fetch a receipt from its provider and record the payment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use console::style;
use serde_json::json;
use tracing::{debug, info, warn};

use payverify_core::models::config::FetchConfig;
use payverify_core::{JsonLinesStore, PaymentRecord, PaymentStore, ReceiptParser};

use super::load_config;

/// Arguments for the verify command.
#[derive(Args)]
pub struct VerifyArgs {
    /// Registered provider name (see `payverify config add-provider`)
    #[arg(long)]
    provider: String,

    /// Receipt identifier issued by the provider
    #[arg(long)]
    receipt_id: String,

    /// User the payment is recorded for
    #[arg(long)]
    user_id: String,

    /// Payments file (overrides the configured store path)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Fetch and extract without recording the payment
    #[arg(long)]
    dry_run: bool,
}

pub async fn run(args: VerifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let provider = config.provider(&args.provider).with_context(|| {
        format!(
            "Provider not registered: {}. Run 'payverify config add-provider' first.",
            args.provider
        )
    })?;

    let url = provider.receipt_url(&args.receipt_id);
    info!("Fetching receipt from {}", url);

    let body = fetch_receipt(&url, &config.fetch).await?;
    let result = ReceiptParser::new().parse(&body, &provider.name);

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
    if result.fields.is_empty() {
        warn!("No payment fields found in receipt {}", args.receipt_id);
    }

    let payment = PaymentRecord::from_fields(&args.user_id, &result.fields);
    if result.fields.payment_date.is_some() && payment.payment_date.is_none() {
        warn!("Unrecognized payment date format: {:?}", result.fields.payment_date);
    }

    if args.dry_run {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "url": url,
                "fields": result.fields,
                "payment": payment,
            }))?
        );
        return Ok(());
    }

    let store_path = args.store.unwrap_or_else(|| config.store.payments_path.clone());
    let mut store = JsonLinesStore::open(&store_path)?;
    store.insert(&payment)?;
    store.close()?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "message": "Payment verified and saved successfully",
            "payment": payment,
            "url": url,
        }))?
    );

    Ok(())
}

/// GET the receipt page. Anything but 200 is a failure.
async fn fetch_receipt(url: &str, fetch: &FetchConfig) -> anyhow::Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch payment page {}", url))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        anyhow::bail!("Failed to fetch payment page {}: HTTP {}", url, status);
    }

    let body = response
        .bytes()
        .await
        .context("Failed to read page content")?;

    let preview: String = String::from_utf8_lossy(&body)
        .chars()
        .take(fetch.preview_chars)
        .collect();
    debug!("Receipt content (first {} chars): {}", fetch.preview_chars, preview);

    Ok(body.to_vec())
}
