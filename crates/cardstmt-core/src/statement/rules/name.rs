//! Cardholder name extraction.

use super::cascade::{Cascade, Rule};
use super::patterns::{CARD_MEMBER_LABEL, CARDHOLDER_NAME_LABEL, NAME_LABEL, SALUTATION};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::statement::Field;

/// Cardholder name extractor.
///
/// Tries `Name:`, `Cardholder Name:`, `Card Member:`, then the `Dear NAME,`
/// salutation.
pub struct NameExtractor {
    cascade: Cascade,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self {
            cascade: Cascade::new(
                Field::CardholderName,
                vec![
                    Rule::new("name_label", &NAME_LABEL),
                    Rule::new("cardholder_name_label", &CARDHOLDER_NAME_LABEL),
                    Rule::new("card_member_label", &CARD_MEMBER_LABEL),
                    Rule::new("salutation", &SALUTATION),
                ],
            ),
        }
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.cascade.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.cascade.all_matches(text)
    }
}

/// Extract the cardholder name from statement text.
pub fn extract_cardholder_name(text: &str) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}
