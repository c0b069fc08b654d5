//! Masked card number suffix extraction.

use super::cascade::{Cascade, Rule};
use super::patterns::{CARD_ENDING_IN, CARD_NUMBER_LABEL, MASKED_CARD_NUMBER};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::statement::Field;

/// Extractor for the last four digits of the card number.
pub struct CardSuffixExtractor {
    cascade: Cascade,
}

impl CardSuffixExtractor {
    pub fn new() -> Self {
        Self {
            cascade: Cascade::new(
                Field::CardSuffix,
                vec![
                    Rule::new("masked_number", &MASKED_CARD_NUMBER),
                    Rule::new("card_number_label", &CARD_NUMBER_LABEL),
                    Rule::new("ending_in", &CARD_ENDING_IN),
                ],
            ),
        }
    }
}

impl Default for CardSuffixExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CardSuffixExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.cascade.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.cascade.all_matches(text)
    }
}

/// Extract the card number suffix from statement text.
pub fn extract_card_suffix(text: &str) -> Option<String> {
    CardSuffixExtractor::new().extract(text).map(|m| m.value)
}
