//! Rule-based statement parser: issuer detection plus one cascade per field.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::statement::{ExtractionResult, Field, FieldValue, StatementFields};

use super::rules::{
    AmountExtractor, BillingCycleExtractor, CardSuffixExtractor, DueDateExtractor,
    ExtractionMatch, FieldExtractor, IssuerCatalog, NameExtractor,
};

/// Trait for statement parsing.
pub trait StatementParser {
    /// Parse statement text into an extraction result.
    ///
    /// Missing fields and unknown issuers are part of the result, never errors.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Every rule match for one field, winner first.
#[derive(Debug, Clone)]
pub struct FieldInspection {
    pub field: Field,
    pub candidates: Vec<ExtractionMatch<String>>,
}

impl FieldInspection {
    /// The match the cascade would pick.
    pub fn winner(&self) -> Option<&ExtractionMatch<String>> {
        self.candidates.first()
    }
}

/// Statement parser driven by keyword catalogs and regex cascades.
pub struct RuleBasedParser {
    catalog: IssuerCatalog,
    partial_threshold: usize,
    name: NameExtractor,
    card: CardSuffixExtractor,
    billing: BillingCycleExtractor,
    due_date: DueDateExtractor,
    amount: AmountExtractor,
}

impl RuleBasedParser {
    /// Create a new parser with the built-in issuer catalog.
    pub fn new() -> Self {
        Self {
            catalog: IssuerCatalog::default(),
            partial_threshold: 3,
            name: NameExtractor::new(),
            card: CardSuffixExtractor::new(),
            billing: BillingCycleExtractor::new(),
            due_date: DueDateExtractor::new(),
            amount: AmountExtractor::new(),
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_catalog(IssuerCatalog::new(config.issuers.clone()))
            .with_partial_threshold(config.partial_threshold)
    }

    /// Replace the issuer catalog.
    pub fn with_catalog(mut self, catalog: IssuerCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the number of missing fields that makes a result partial.
    pub fn with_partial_threshold(mut self, threshold: usize) -> Self {
        self.partial_threshold = threshold;
        self
    }

    pub fn catalog(&self) -> &IssuerCatalog {
        &self.catalog
    }

    fn extractor(&self, field: Field) -> &dyn FieldExtractor<Output = ExtractionMatch<String>> {
        match field {
            Field::CardholderName => &self.name,
            Field::CardSuffix => &self.card,
            Field::BillingCycle => &self.billing,
            Field::DueDate => &self.due_date,
            Field::AmountDue => &self.amount,
        }
    }

    fn extract_field(&self, field: Field, text: &str) -> FieldValue {
        match self.extractor(field).extract(text) {
            Some(m) => {
                debug!("{}: {:?} via rule {} (#{})", field, m.value, m.rule, m.priority);
                FieldValue::new(m.value)
            }
            None => {
                debug!("{}: no rule matched", field);
                FieldValue::NotFound
            }
        }
    }

    /// Report every rule match for every field.
    pub fn inspect(&self, text: &str) -> Vec<FieldInspection> {
        Field::ALL
            .into_iter()
            .map(|field| FieldInspection {
                field,
                candidates: self.extractor(field).extract_all(text),
            })
            .collect()
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing statement from {} characters of text", text.len());

        let issuer = self.catalog.detect(text);

        let fields = StatementFields {
            cardholder_name: self.extract_field(Field::CardholderName, text),
            card_suffix: self.extract_field(Field::CardSuffix, text),
            billing_cycle: self.extract_field(Field::BillingCycle, text),
            due_date: self.extract_field(Field::DueDate, text),
            amount_due: self.extract_field(Field::AmountDue, text),
        };

        let result = ExtractionResult::assemble(issuer, fields, self.partial_threshold);

        debug!(
            "Extracted statement from {} with {} missing fields in {:?}",
            result.issuer,
            result.missing_fields().len(),
            start.elapsed()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::{Issuer, KnownIssuer, Quality};
    use pretty_assertions::assert_eq;

    const ICICI_STATEMENT: &str = r#"
ICICI BANK
Credit Card Statement
Name: JOHN SMITH
Card ending in 1234
Statement Period: 01-Jan to 31-Jan
Due Date: 15-Feb
Total Amount Due: 5,432.10
"#;

    #[test]
    fn test_parse_complete_statement() {
        let result = RuleBasedParser::new().parse(ICICI_STATEMENT);

        assert_eq!(result.issuer, Issuer::Known("ICICI".to_string()));
        assert_eq!(result.cardholder_name.as_str(), "JOHN SMITH");
        assert_eq!(result.card_suffix.as_str(), "1234");
        assert_eq!(result.billing_cycle.as_str(), "01-Jan to 31-Jan");
        assert_eq!(result.due_date.as_str(), "15-Feb");
        assert_eq!(result.amount_due.as_str(), "₹5,432.10");
        assert_eq!(result.quality, Quality::Complete);
    }

    #[test]
    fn test_parse_sparse_statement_is_partial() {
        let result = RuleBasedParser::new().parse("SBI\nName: A B\n");

        assert_eq!(result.issuer, Issuer::Known("SBI".to_string()));
        assert_eq!(result.cardholder_name, FieldValue::Found("A B".to_string()));
        assert_eq!(result.card_suffix, FieldValue::NotFound);
        assert_eq!(result.billing_cycle, FieldValue::NotFound);
        assert_eq!(result.due_date, FieldValue::NotFound);
        assert_eq!(result.amount_due, FieldValue::NotFound);
        assert_eq!(
            result.quality,
            Quality::Partial {
                missing_fields: vec![
                    Field::CardSuffix,
                    Field::BillingCycle,
                    Field::DueDate,
                    Field::AmountDue,
                ]
            }
        );
    }

    #[test]
    fn test_exactly_three_missing() {
        let result = RuleBasedParser::new().parse("SBI\nName: A B\nCard ending in 9999\n");
        assert_eq!(
            result.quality,
            Quality::Partial {
                missing_fields: vec![Field::BillingCycle, Field::DueDate, Field::AmountDue]
            }
        );
    }

    #[test]
    fn test_exactly_two_missing() {
        let text = "SBI\nName: A B\nCard ending in 9999\nTotal Due: 10\n";
        let result = RuleBasedParser::new().parse(text);
        assert_eq!(result.missing_fields(), vec![Field::BillingCycle, Field::DueDate]);
        assert_eq!(result.quality, Quality::Complete);
    }

    #[test]
    fn test_captured_sentinel_text_counts_as_missing() {
        let text = "SBI\nName: A B\nCard ending in 1234\n\
            Statement Period: Not Found\nDue Date: Not Found\n";
        let result = RuleBasedParser::new().parse(text);

        assert_eq!(result.billing_cycle, FieldValue::NotFound);
        assert_eq!(result.due_date, FieldValue::NotFound);
        assert_eq!(
            result.quality,
            Quality::Partial {
                missing_fields: vec![Field::BillingCycle, Field::DueDate, Field::AmountDue]
            }
        );

        let json = serde_json::to_string(&result).unwrap();
        let back: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_unknown_issuer_still_extracts_fields() {
        let result = RuleBasedParser::new().parse("Name: JANE DOE\nTotal Due: 250.00");
        assert_eq!(result.issuer, Issuer::Unknown);
        assert_eq!(result.cardholder_name.as_str(), "JANE DOE");
        assert_eq!(result.amount_due.as_str(), "₹250.00");
    }

    #[test]
    fn test_amount_never_prefixed_when_missing() {
        let result = RuleBasedParser::new().parse("HDFC");
        assert_eq!(result.amount_due.as_str(), "Not Found");
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            partial_threshold: 5,
            reject_unknown_issuer: false,
            issuers: vec![KnownIssuer::new("KOTAK", ["KOTAK"])],
        };
        let parser = RuleBasedParser::from_config(&config);
        let result = parser.parse("Kotak Mahindra Bank\nName: A B\n");
        assert_eq!(result.issuer.as_str(), "KOTAK");
        // four missing fields, below the threshold of five
        assert_eq!(result.quality, Quality::Complete);
    }

    #[test]
    fn test_inspect_winner_matches_parse() {
        let parser = RuleBasedParser::new();
        let text = format!("{}\nPayment Due Date: 14-Feb\nClosing Balance: 1.00", ICICI_STATEMENT);
        let result = parser.parse(&text);

        for inspection in parser.inspect(&text) {
            let expected = result.field(inspection.field);
            match inspection.winner() {
                Some(winner) => assert_eq!(winner.value, expected.as_str()),
                None => assert_eq!(expected, &FieldValue::NotFound),
            }
        }

        let due = parser
            .inspect(&text)
            .into_iter()
            .find(|i| i.field == Field::DueDate)
            .unwrap();
        assert_eq!(due.winner().unwrap().rule, "payment_due_date");
        assert_eq!(due.candidates.len(), 2);
    }
}
