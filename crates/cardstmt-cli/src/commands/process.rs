//! Process command - extract data from a single statement file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardstmt_core::statement::rules::parse_amount;
use cardstmt_core::{ExtractionResult, Field, StatementProcessor};

use super::{load_config, read_statement_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Accept statements whose bank is not in the catalog
    #[arg(long)]
    allow_unknown: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
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

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let processor = StatementProcessor::new(&config)
        .with_reject_unknown_issuer(config.extraction.reject_unknown_issuer && !args.allow_unknown);

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading statement...");
    pb.set_position(10);
    let text = match read_statement_text(&args.input, &processor) {
        Ok(text) => text,
        Err(e) => {
            pb.abandon();
            return Err(e);
        }
    };

    pb.set_message("Extracting fields...");
    pb.set_position(60);
    let result = match processor.process_text(&text) {
        Ok(result) => result,
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };

    pb.set_position(100);
    pb.finish_and_clear();

    if let Some(warning) = result.warning() {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_result(&result, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render an extraction result in the requested format.
pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// Missing field names joined for single-cell output.
pub fn missing_list(result: &ExtractionResult) -> String {
    result
        .missing_fields()
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

fn quality_label(result: &ExtractionResult) -> &'static str {
    if result.is_partial() { "partial" } else { "complete" }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "issuer",
        "cardholder_name",
        "card_suffix",
        "billing_cycle",
        "due_date",
        "amount_due",
        "amount_due_value",
        "quality",
        "missing_fields",
    ])?;

    let amount_value = result
        .amount_due
        .value()
        .and_then(parse_amount)
        .map(|d| d.to_string())
        .unwrap_or_default();

    wtr.write_record([
        result.issuer.as_str(),
        result.cardholder_name.as_str(),
        result.card_suffix.as_str(),
        result.billing_cycle.as_str(),
        result.due_date.as_str(),
        result.amount_due.as_str(),
        &amount_value,
        quality_label(result),
        &missing_list(result),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bank: {}\n", result.issuer));
    output.push('\n');

    for field in Field::ALL {
        output.push_str(&format!("{:<14} {}\n", format!("{}:", field.label()), result.field(field)));
    }

    output.push('\n');
    match result.warning() {
        Some(warning) => output.push_str(&format!("Quality: partial ({})\n", warning)),
        None => output.push_str("Quality: complete\n"),
    }

    output
}
