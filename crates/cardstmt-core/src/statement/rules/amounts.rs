//! Amount due extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::cascade::{Cascade, Rule};
use super::patterns::{AMOUNT_PAYABLE, CLOSING_BALANCE, TOTAL_AMOUNT_DUE, TOTAL_DUE};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::statement::Field;

/// Currency symbol prefixed to extracted amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Total amount due extractor.
///
/// Found values are always returned with the currency symbol prefixed.
pub struct AmountExtractor {
    cascade: Cascade,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            cascade: Cascade::new(
                Field::AmountDue,
                vec![
                    Rule::new("total_amount_due", &TOTAL_AMOUNT_DUE),
                    Rule::new("total_due", &TOTAL_DUE),
                    Rule::new("amount_payable", &AMOUNT_PAYABLE),
                    Rule::new("closing_balance", &CLOSING_BALANCE),
                ],
            ),
        }
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.cascade
            .first_match(text)
            .map(|m| m.map(|v| prefix_currency(&v)))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.cascade
            .all_matches(text)
            .into_iter()
            .map(|m| m.map(|v| prefix_currency(&v)))
            .collect()
    }
}

/// Extract the total amount due, currency-prefixed.
pub fn extract_amount_due(text: &str) -> Option<String> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}

/// Prefix an amount with the currency symbol unless it already has it.
pub fn prefix_currency(amount: &str) -> String {
    if amount.starts_with(CURRENCY_SYMBOL) {
        amount.to_string()
    } else {
        format!("{}{}", CURRENCY_SYMBOL, amount)
    }
}

/// Parse an extracted amount (e.g., "₹1,23,456.78") into a decimal.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches(CURRENCY_SYMBOL)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim_end_matches('.');

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_amount_due_prefixed() {
        let m = AmountExtractor::new()
            .extract("Total Amount Due: 5,432.10")
            .unwrap();
        assert_eq!(m.value, "₹5,432.10");
        assert_eq!(m.rule, "total_amount_due");
    }

    #[test]
    fn test_rupee_sign_not_doubled() {
        assert_eq!(
            extract_amount_due("Total Due: ₹ 12,000"),
            Some("₹12,000".to_string())
        );
    }

    #[test]
    fn test_closing_balance_fallback() {
        let m = AmountExtractor::new()
            .extract("Opening Balance: 100.00\nClosing Balance: 2,500.5")
            .unwrap();
        assert_eq!(m.value, "₹2,500.5");
        assert_eq!(m.rule, "closing_balance");
    }

    #[test]
    fn test_total_amount_due_beats_total_due() {
        let text = "Total Due: 99.00\nTotal Amount Due: 1,000.00";
        assert_eq!(extract_amount_due(text), Some("₹1,000.00".to_string()));
    }

    #[test]
    fn test_not_found_is_none() {
        assert_eq!(extract_amount_due("Minimum payment 200"), None);
    }

    #[test]
    fn test_prefix_currency() {
        assert_eq!(prefix_currency("10"), "₹10");
        assert_eq!(prefix_currency("₹10"), "₹10");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("₹5,432.10"), Some(Decimal::new(543210, 2)));
        assert_eq!(parse_amount("1,23,456.78"), Some(Decimal::new(12345678, 2)));
        assert_eq!(parse_amount("₹2,000."), Some(Decimal::new(2000, 0)));
        assert_eq!(parse_amount("₹,"), None);
        assert_eq!(parse_amount("Not Found"), None);
    }
}
