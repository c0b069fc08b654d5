//! Core library for credit card statement parsing.
//!
//! This crate provides:
//! - PDF text extraction
//! - Issuer detection from a keyword catalog
//! - Field extraction through ordered regex cascades (cardholder name,
//!   card suffix, billing cycle, due date, amount due)
//! - Result assembly with complete/partial quality classification

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{ExtractionError, PdfError, Result, StatementError};
pub use models::config::{ExtractionConfig, PdfConfig, ServerConfig, StatementConfig};
pub use models::statement::{
    ExtractionResult, Field, FieldValue, Issuer, KnownIssuer, NOT_FOUND, Quality,
    StatementFields, UNKNOWN_ISSUER,
};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
pub use statement::{FieldInspection, RuleBasedParser, StatementParser, StatementProcessor};
