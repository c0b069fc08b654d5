//! Boundary checks around the parser: document size, text length, issuer policy.

use tracing::{debug, info, warn};

use crate::error::{ExtractionError, PdfError};
use crate::models::config::StatementConfig;
use crate::models::statement::ExtractionResult;
use crate::pdf::{PdfExtractor, PdfProcessor};

use super::parser::{RuleBasedParser, StatementParser};

/// Runs documents or text through the parser and enforces the caller-facing
/// failure conditions the parser itself never raises.
pub struct StatementProcessor {
    parser: RuleBasedParser,
    max_file_size: usize,
    min_text_length: usize,
    reject_unknown_issuer: bool,
}

impl StatementProcessor {
    pub fn new(config: &StatementConfig) -> Self {
        Self {
            parser: RuleBasedParser::from_config(&config.extraction),
            max_file_size: config.pdf.max_file_size,
            min_text_length: config.pdf.min_text_length,
            reject_unknown_issuer: config.extraction.reject_unknown_issuer,
        }
    }

    /// Override the unknown-issuer policy.
    pub fn with_reject_unknown_issuer(mut self, reject: bool) -> Self {
        self.reject_unknown_issuer = reject;
        self
    }

    pub fn parser(&self) -> &RuleBasedParser {
        &self.parser
    }

    /// Supported issuer names, in catalog order.
    pub fn supported_issuers(&self) -> Vec<String> {
        self.parser
            .catalog()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Validate and parse already-extracted statement text.
    pub fn process_text(&self, text: &str) -> super::Result<ExtractionResult> {
        let length = text.trim().chars().count();
        if length < self.min_text_length {
            return Err(ExtractionError::TextTooShort {
                length,
                minimum: self.min_text_length,
            });
        }

        let result = self.parser.parse(text);

        if !result.issuer.is_known() {
            if self.reject_unknown_issuer {
                return Err(ExtractionError::UnknownIssuer {
                    supported: self.supported_issuers(),
                });
            }
            warn!("Statement issuer not recognized");
        }

        if let Some(warning) = result.warning() {
            warn!("{}", warning);
        }

        info!("Processed {} statement ({:?})", result.issuer, result.quality);
        Ok(result)
    }

    /// Extract text from PDF bytes and process it.
    pub fn process_pdf(&self, data: &[u8]) -> crate::Result<ExtractionResult> {
        let text = self.extract_pdf_text(data)?;
        Ok(self.process_text(&text)?)
    }

    /// Extract the text layer of a PDF, enforcing the size limit.
    pub fn extract_pdf_text(&self, data: &[u8]) -> Result<String, PdfError> {
        if data.len() > self.max_file_size {
            return Err(PdfError::TooLarge {
                size: data.len(),
                limit: self.max_file_size,
            });
        }

        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;
        let content = extractor.extract_all()?;

        debug!(
            "Extracted {} chars of text from {} pages",
            content.text.len(),
            content.page_count
        );
        Ok(content.text)
    }
}

impl Default for StatementProcessor {
    fn default() -> Self {
        Self::new(&StatementConfig::default())
    }
}
