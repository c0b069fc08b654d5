//! Banks command - list the issuer catalog.

use clap::Args;
use console::style;
use serde_json::json;

use cardstmt_core::statement::rules::IssuerCatalog;

use super::load_config;

/// Arguments for the banks command.
#[derive(Args)]
pub struct BanksArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: BanksArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let catalog = IssuerCatalog::new(config.extraction.issuers);

    if args.json {
        let banks = catalog.names();
        let output = json!({
            "banks": banks,
            "total": banks.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {} supported banks", style("ℹ").blue(), catalog.len());
    println!();
    for issuer in catalog.issuers() {
        println!(
            "  {:<8} {}",
            style(&issuer.name).bold(),
            issuer.aliases.join(", ")
        );
    }

    Ok(())
}
