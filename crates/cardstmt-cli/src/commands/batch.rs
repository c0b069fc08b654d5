//! Batch processing command for multiple statement files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use cardstmt_core::statement::rules::parse_amount;
use cardstmt_core::{ExtractionResult, StatementProcessor};

use super::process::{OutputFormat, format_result, missing_list};
use super::{load_config, read_statement_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Accept statements whose bank is not in the catalog
    #[arg(long)]
    allow_unknown: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn status(&self) -> &'static str {
        match &self.result {
            Some(r) if r.is_partial() => "partial",
            Some(_) => "success",
            None => "error",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let processor = StatementProcessor::new(&config)
        .with_reject_unknown_issuer(config.extraction.reject_unknown_issuer && !args.allow_unknown);

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt" | "text")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = read_statement_text(&path, &processor)
            .and_then(|text| Ok(processor.process_text(&text)?));

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                if let Some(warning) = result.warning() {
                    warn!("{}: {}", path.display(), warning);
                }
                results.push(ProcessResult {
                    path,
                    result: Some(result),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let succeeded: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let partial = results.iter().filter(|r| r.status() == "partial").count();

    if let Some(output_dir) = &args.output_dir {
        let mut used = HashSet::new();
        for entry in &succeeded {
            if let Some(result) = &entry.result {
                let output_path = output_path(output_dir, &entry.path, args.format, &mut used);
                fs::write(&output_path, format_result(result, args.format, false)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} partial), {} failed",
        style(succeeded.len()).green(),
        style(partial).yellow(),
        style(failed.len()).red()
    );

    let total_due: Decimal = succeeded
        .iter()
        .filter_map(|r| r.result.as_ref())
        .filter_map(|r| r.amount_due.value().and_then(parse_amount))
        .sum();
    println!("   Total amount due: {}", total_due);

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file for `input`, distinct from every path already in `used`.
///
/// Inputs sharing a stem (`a.pdf`, `a.txt`) get the input extension appended
/// to the name, then a counter if that is taken too.
fn output_path(
    output_dir: &Path,
    input: &Path,
    format: OutputFormat,
    used: &mut HashSet<PathBuf>,
) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("statement");
    let input_ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");

    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };

    let mut path = output_dir.join(format!("{}.{}", stem, extension));
    if used.contains(&path) {
        let mut name = format!("{}-{}", stem, input_ext);
        let mut n = 2;
        while used.contains(&output_dir.join(format!("{}.{}", name, extension))) {
            name = format!("{}-{}-{}", stem, input_ext, n);
            n += 1;
        }
        path = output_dir.join(format!("{}.{}", name, extension));
        warn!(
            "Output name for {} already taken, writing {}",
            input.display(),
            path.display()
        );
    }

    used.insert(path.clone());
    path
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = chrono::Local::now().to_rfc3339();

    wtr.write_record([
        "filename",
        "status",
        "issuer",
        "cardholder_name",
        "card_suffix",
        "billing_cycle",
        "due_date",
        "amount_due",
        "amount_due_value",
        "missing_fields",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for entry in results {
        let filename = entry
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = entry.processing_time_ms.to_string();

        if let Some(result) = &entry.result {
            let amount_value = result
                .amount_due
                .value()
                .and_then(parse_amount)
                .map(|d| d.to_string())
                .unwrap_or_default();

            wtr.write_record([
                filename,
                entry.status(),
                result.issuer.as_str(),
                result.cardholder_name.as_str(),
                result.card_suffix.as_str(),
                result.billing_cycle.as_str(),
                result.due_date.as_str(),
                result.amount_due.as_str(),
                &amount_value,
                &missing_list(result),
                &time_ms,
                &processed_at,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                entry.status(),
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &time_ms,
                &processed_at,
                entry.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_stem() {
        let mut used = HashSet::new();
        let path = output_path(Path::new("out"), Path::new("in/a.pdf"), OutputFormat::Json, &mut used);
        assert_eq!(path, Path::new("out/a.json"));
    }

    #[test]
    fn test_output_path_avoids_shared_stems() {
        let mut used = HashSet::new();
        let dir = Path::new("out");
        let first = output_path(dir, Path::new("in/a.pdf"), OutputFormat::Csv, &mut used);
        let second = output_path(dir, Path::new("in/a.txt"), OutputFormat::Csv, &mut used);
        let third = output_path(dir, Path::new("other/a.txt"), OutputFormat::Csv, &mut used);

        assert_eq!(first, Path::new("out/a.csv"));
        assert_eq!(second, Path::new("out/a-txt.csv"));
        assert_eq!(third, Path::new("out/a-txt-2.csv"));
    }
}
