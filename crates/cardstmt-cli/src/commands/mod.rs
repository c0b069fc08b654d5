//! Subcommand implementations.

pub mod banks;
pub mod batch;
pub mod config;
pub mod inspect;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use cardstmt_core::{StatementConfig, StatementProcessor};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardstmt")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StatementConfig> {
    if let Some(path) = config_path {
        return Ok(StatementConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(StatementConfig::from_file(&default_path)?)
    } else {
        Ok(StatementConfig::default())
    }
}

/// Read statement text from a PDF or a plain-text file.
pub fn read_statement_text(path: &Path, processor: &StatementProcessor) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(processor.extract_pdf_text(&data)?)
        }
        "txt" | "text" => Ok(fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}
