//! Extract command - read payment data from a single saved receipt.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use payverify_core::{parse_payment_date, CanonicalFieldKey, CanonicalFieldSet, ReceiptParser};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Receipt file (PDF or saved HTML page)
    #[arg(required = true)]
    input: PathBuf,

    /// Provider whose receipt layout applies
    #[arg(short, long, default_value = "TeleBirr")]
    provider: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also output the payment date normalized to RFC 3339
    #[arg(long)]
    parse_date: bool,

    /// Print extraction warnings to stderr
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Extracted fields plus the optional normalized date.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldsOutput<'a> {
    #[serde(flatten)]
    fields: &'a CanonicalFieldSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed_payment_date: Option<String>,
}

const PARSED_DATE_COLUMN: &str = "parsedPaymentDate";

pub async fn run(args: ExtractArgs, _config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting {} as {}", args.input.display(), args.provider);

    let content = fs::read(&args.input)?;
    let result = ReceiptParser::new().parse(&content, &args.provider);

    debug!(
        "{:?} receipt parsed in {}ms",
        result.content_kind, result.processing_time_ms
    );

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let output = format_fields(&result.fields, args.format, args.parse_date)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Payment date normalized to RFC 3339, if it parses.
fn normalized_date(fields: &CanonicalFieldSet) -> Option<String> {
    fields
        .payment_date
        .as_deref()
        .and_then(parse_payment_date)
        .map(|dt| dt.and_utc().to_rfc3339())
}

pub fn format_fields(
    fields: &CanonicalFieldSet,
    format: OutputFormat,
    parse_date: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = FieldsOutput {
                fields,
                parsed_payment_date: if parse_date { normalized_date(fields) } else { None },
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Csv => format_csv(fields, parse_date),
        OutputFormat::Text => Ok(format_text(fields, parse_date)),
    }
}

fn format_csv(fields: &CanonicalFieldSet, parse_date: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = CanonicalFieldKey::ALL.iter().map(|k| k.as_str()).collect();
    let mut row: Vec<String> = CanonicalFieldKey::ALL
        .iter()
        .map(|k| fields.get(*k).to_string())
        .collect();

    if parse_date {
        header.push(PARSED_DATE_COLUMN);
        row.push(normalized_date(fields).unwrap_or_default());
    }

    wtr.write_record(&header)?;
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(fields: &CanonicalFieldSet, parse_date: bool) -> String {
    let mut output = String::new();

    for key in CanonicalFieldKey::ALL {
        let value = fields.get(key);
        let value = if value.is_empty() { "-" } else { value };
        output.push_str(&format!("{:<24}{}\n", key.as_str(), value));
    }

    if parse_date {
        let parsed = normalized_date(fields);
        output.push_str(&format!(
            "{:<24}{}\n",
            PARSED_DATE_COLUMN,
            parsed.as_deref().unwrap_or("-")
        ));
    }

    output
}
