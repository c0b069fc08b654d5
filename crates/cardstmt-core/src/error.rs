//! Error types for the cardstmt-core library.

use thiserror::Error;

/// Main error type for the cardstmt library.
#[derive(Error, Debug)]
pub enum StatementError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to turning a document into text.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document exceeds the configured size limit.
    #[error("file size {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
}

/// Boundary conditions surfaced by the statement processor.
///
/// A missing field or an unrecognized issuer is never an error inside the
/// parser itself; these variants only appear when a caller asks the
/// processor to enforce them.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Extracted text is too short to be a plausible statement.
    #[error("extracted text is too short ({length} chars, need at least {minimum}); file may be corrupted or empty")]
    TextTooShort { length: usize, minimum: usize },

    /// No catalog issuer matched the statement text.
    #[error("bank not recognized; supported banks: {}", .supported.join(", "))]
    UnknownIssuer { supported: Vec<String> },
}

/// Result type for the cardstmt library.
pub type Result<T> = std::result::Result<T, StatementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_issuer_message_lists_banks() {
        let err = ExtractionError::UnknownIssuer {
            supported: vec!["HDFC".to_string(), "SBI".to_string()],
        };
        assert_eq!(err.to_string(), "bank not recognized; supported banks: HDFC, SBI");
    }

    #[test]
    fn test_nested_error_display() {
        let err: StatementError = PdfError::TooLarge { size: 11, limit: 10 }.into();
        assert_eq!(
            err.to_string(),
            "PDF error: file size 11 bytes exceeds the 10 byte limit"
        );
    }
}
