//! Rule-based field extractors for credit card statements.

pub mod amounts;
pub mod card;
pub mod cascade;
pub mod dates;
pub mod issuer;
pub mod name;
pub mod patterns;

pub use amounts::{AmountExtractor, CURRENCY_SYMBOL, extract_amount_due, parse_amount, prefix_currency};
pub use card::{CardSuffixExtractor, extract_card_suffix};
pub use cascade::{Cascade, Rule, normalize_whitespace};
pub use dates::{BillingCycleExtractor, DueDateExtractor, extract_billing_cycle, extract_due_date};
pub use issuer::{IssuerCatalog, detect_issuer};
pub use name::{NameExtractor, extract_cardholder_name};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract the match of every rule that fires, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value recognized by one rule of a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that produced the value.
    pub rule: &'static str,
    /// Position of the rule in its cascade (0 is tried first).
    pub priority: usize,
    /// Byte span of the captured value in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, priority: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            priority,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            rule: self.rule,
            priority: self.priority,
            position: self.position,
            source: self.source,
        }
    }
}
