//! Configuration structures for the statement pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatementError};

use super::statement::{KnownIssuer, default_issuers};

/// Main configuration for the cardstmt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Largest accepted document, in bytes.
    pub max_file_size: usize,

    /// Minimum trimmed text length to consider the document a statement.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            min_text_length: 50,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of missing fields at which a result is reported as partial.
    pub partial_threshold: usize,

    /// Treat an unrecognized issuer as a processing failure.
    pub reject_unknown_issuer: bool,

    /// Issuer catalog, in detection priority order.
    pub issuers: Vec<KnownIssuer>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            partial_threshold: 3,
            reject_unknown_issuer: true,
            issuers: default_issuers(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Allowed CORS origins. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
        }
    }
}

impl StatementConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| StatementError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StatementError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Names of the configured issuers, in catalog order.
    pub fn issuer_names(&self) -> Vec<String> {
        self.extraction.issuers.iter().map(|i| i.name.clone()).collect()
    }
}
