//! Inspect command - show every rule match behind an extraction.

use std::path::PathBuf;

use clap::Args;
use console::style;

use cardstmt_core::StatementProcessor;

use super::{load_config, read_statement_text};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let processor = StatementProcessor::new(&config);
    let text = read_statement_text(&args.input, &processor)?;
    let parser = processor.parser();

    match parser.catalog().detect_with_alias(&text) {
        Some((name, alias)) => println!(
            "{} Bank: {} (matched {:?})",
            style("✓").green(),
            name,
            alias
        ),
        None => println!("{} Bank: not recognized", style("✗").red()),
    }

    for inspection in parser.inspect(&text) {
        println!();
        println!("{}", style(inspection.field.label()).bold());

        if inspection.candidates.is_empty() {
            println!("  {}", style("no rule matched").dim());
            continue;
        }

        for (i, candidate) in inspection.candidates.iter().enumerate() {
            let marker = if i == 0 {
                style("→").green()
            } else {
                style(" ").dim()
            };
            let span = candidate
                .position
                .map(|(start, end)| format!(" @{}..{}", start, end))
                .unwrap_or_default();
            println!(
                "  {} [{}] {:<22} {:?}{}",
                marker, candidate.priority, candidate.rule, candidate.value, span
            );
            println!("        {}", style(format!("matched {:?}", candidate.source)).dim());
        }
    }

    Ok(())
}
