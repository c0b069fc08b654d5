//! Billing cycle and payment due date extraction.
//!
//! Both fields are free text to the end of the labelled line; no date
//! parsing is attempted since issuers print periods in many layouts.

use super::cascade::{Cascade, Rule};
use super::patterns::{
    BILLING_PERIOD, DUE_DATE, PAY_BY, PAYMENT_DUE_DATE, STATEMENT_DATE, STATEMENT_PERIOD,
};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::statement::Field;

/// Billing cycle extractor.
pub struct BillingCycleExtractor {
    cascade: Cascade,
}

impl BillingCycleExtractor {
    pub fn new() -> Self {
        Self {
            cascade: Cascade::new(
                Field::BillingCycle,
                vec![
                    Rule::new("statement_period", &STATEMENT_PERIOD),
                    Rule::new("billing_period", &BILLING_PERIOD),
                    Rule::new("statement_date", &STATEMENT_DATE),
                ],
            ),
        }
    }
}

impl Default for BillingCycleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BillingCycleExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.cascade.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.cascade.all_matches(text)
    }
}

/// Payment due date extractor.
pub struct DueDateExtractor {
    cascade: Cascade,
}

impl DueDateExtractor {
    pub fn new() -> Self {
        Self {
            cascade: Cascade::new(
                Field::DueDate,
                vec![
                    Rule::new("payment_due_date", &PAYMENT_DUE_DATE),
                    Rule::new("due_date", &DUE_DATE),
                    Rule::new("pay_by", &PAY_BY),
                ],
            ),
        }
    }
}

impl Default for DueDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DueDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.cascade.first_match(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.cascade.all_matches(text)
    }
}

/// Extract the billing cycle from statement text.
pub fn extract_billing_cycle(text: &str) -> Option<String> {
    BillingCycleExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the payment due date from statement text.
pub fn extract_due_date(text: &str) -> Option<String> {
    DueDateExtractor::new().extract(text).map(|m| m.value)
}
