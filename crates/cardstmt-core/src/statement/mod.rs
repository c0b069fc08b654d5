//! Statement field extraction module.

mod parser;
mod processor;
pub mod rules;

pub use parser::{FieldInspection, RuleBasedParser, StatementParser};
pub use processor::StatementProcessor;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
