//! Statement data models: issuers, extracted field values, and the assembled result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel written for fields no rule could extract.
pub const NOT_FOUND: &str = "Not Found";

/// Sentinel written when no catalog issuer matched.
pub const UNKNOWN_ISSUER: &str = "UNKNOWN";

/// A card issuer recognized by keyword aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownIssuer {
    /// Canonical issuer name reported in results.
    pub name: String,

    /// Case-insensitive keywords that identify the issuer in statement text.
    pub aliases: Vec<String>,
}

impl KnownIssuer {
    pub fn new<I, S>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// The built-in issuer catalog, in detection priority order.
pub fn default_issuers() -> Vec<KnownIssuer> {
    vec![
        KnownIssuer::new("HDFC", ["HDFC", "HDFC BANK"]),
        KnownIssuer::new("ICICI", ["ICICI", "ICICI BANK"]),
        KnownIssuer::new("SBI", ["SBI", "STATE BANK OF INDIA"]),
        KnownIssuer::new("AXIS", ["AXIS", "AXIS BANK"]),
        KnownIssuer::new("AMEX", ["AMERICAN EXPRESS", "AMEX"]),
    ]
}

/// Detected statement issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Issuer {
    /// Canonical name of a catalog issuer.
    Known(String),
    /// No catalog alias appeared in the text.
    Unknown,
}

impl Issuer {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(name) => name,
            Self::Unknown => UNKNOWN_ISSUER,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<String> for Issuer {
    fn from(name: String) -> Self {
        if name.is_empty() || name == UNKNOWN_ISSUER {
            Self::Unknown
        } else {
            Self::Known(name)
        }
    }
}

impl From<Issuer> for String {
    fn from(issuer: Issuer) -> Self {
        match issuer {
            Issuer::Known(name) => name,
            Issuer::Unknown => UNKNOWN_ISSUER.to_string(),
        }
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one extracted field.
///
/// A found value is never empty and never the sentinel text; both map to
/// `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldValue {
    Found(String),
    NotFound,
}

impl FieldValue {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() || value == NOT_FOUND {
            Self::NotFound
        } else {
            Self::Found(value)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(value) => value,
            Self::NotFound => NOT_FOUND,
        }
    }

    /// The extracted value, or `None` for the sentinel.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(Self::new).unwrap_or(Self::NotFound)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Found(value) => value,
            FieldValue::NotFound => NOT_FOUND.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five statement fields extracted by rule cascades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardholderName,
    CardSuffix,
    BillingCycle,
    DueDate,
    AmountDue,
}

impl Field {
    /// All fields in result order.
    pub const ALL: [Field; 5] = [
        Field::CardholderName,
        Field::CardSuffix,
        Field::BillingCycle,
        Field::DueDate,
        Field::AmountDue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CardholderName => "cardholder_name",
            Self::CardSuffix => "card_suffix",
            Self::BillingCycle => "billing_cycle",
            Self::DueDate => "due_date",
            Self::AmountDue => "amount_due",
        }
    }

    /// Human-readable label for text output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CardholderName => "Cardholder",
            Self::CardSuffix => "Card ending",
            Self::BillingCycle => "Billing cycle",
            Self::DueDate => "Payment due",
            Self::AmountDue => "Amount due",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall extraction quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "quality", rename_all = "snake_case")]
pub enum Quality {
    Complete,
    Partial { missing_fields: Vec<Field> },
}

impl Quality {
    /// Classify a set of missing fields against the partial threshold.
    pub fn classify(missing_fields: Vec<Field>, partial_threshold: usize) -> Self {
        if missing_fields.len() >= partial_threshold {
            Self::Partial { missing_fields }
        } else {
            Self::Complete
        }
    }
}

/// Raw field values before assembly.
#[derive(Debug, Clone)]
pub struct StatementFields {
    pub cardholder_name: FieldValue,
    pub card_suffix: FieldValue,
    pub billing_cycle: FieldValue,
    pub due_date: FieldValue,
    pub amount_due: FieldValue,
}

/// Structured data extracted from one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub issuer: Issuer,
    pub cardholder_name: FieldValue,
    pub card_suffix: FieldValue,
    pub billing_cycle: FieldValue,
    pub due_date: FieldValue,
    pub amount_due: FieldValue,
    #[serde(flatten)]
    pub quality: Quality,
}

impl ExtractionResult {
    /// Combine the detected issuer and field values, classifying quality.
    pub fn assemble(issuer: Issuer, fields: StatementFields, partial_threshold: usize) -> Self {
        let StatementFields {
            cardholder_name,
            card_suffix,
            billing_cycle,
            due_date,
            amount_due,
        } = fields;

        let mut result = Self {
            issuer,
            cardholder_name,
            card_suffix,
            billing_cycle,
            due_date,
            amount_due,
            quality: Quality::Complete,
        };
        result.quality = Quality::classify(result.missing_fields(), partial_threshold);
        result
    }

    /// Value of a single field.
    pub fn field(&self, field: Field) -> &FieldValue {
        match field {
            Field::CardholderName => &self.cardholder_name,
            Field::CardSuffix => &self.card_suffix,
            Field::BillingCycle => &self.billing_cycle,
            Field::DueDate => &self.due_date,
            Field::AmountDue => &self.amount_due,
        }
    }

    /// Fields holding the sentinel, in result order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.field(*f).is_found())
            .collect()
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.quality, Quality::Partial { .. })
    }

    /// Warning text for partial results.
    pub fn warning(&self) -> Option<String> {
        match &self.quality {
            Quality::Complete => None,
            Quality::Partial { missing_fields } => Some(format!(
                "Some fields could not be extracted: {}",
                missing_fields
                    .iter()
                    .map(Field::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(found: &[Field]) -> StatementFields {
        let value = |f: Field| {
            if found.contains(&f) {
                FieldValue::new(format!("{}-value", f))
            } else {
                FieldValue::NotFound
            }
        };
        StatementFields {
            cardholder_name: value(Field::CardholderName),
            card_suffix: value(Field::CardSuffix),
            billing_cycle: value(Field::BillingCycle),
            due_date: value(Field::DueDate),
            amount_due: value(Field::AmountDue),
        }
    }

    #[test]
    fn test_two_missing_is_complete() {
        let result = ExtractionResult::assemble(
            Issuer::Known("HDFC".to_string()),
            fields(&[Field::CardholderName, Field::CardSuffix, Field::AmountDue]),
            3,
        );
        assert_eq!(result.quality, Quality::Complete);
        assert_eq!(result.warning(), None);
    }

    #[test]
    fn test_three_missing_is_partial() {
        let result = ExtractionResult::assemble(
            Issuer::Known("HDFC".to_string()),
            fields(&[Field::CardholderName, Field::AmountDue]),
            3,
        );
        assert_eq!(
            result.quality,
            Quality::Partial {
                missing_fields: vec![Field::CardSuffix, Field::BillingCycle, Field::DueDate]
            }
        );
        assert_eq!(
            result.warning().unwrap(),
            "Some fields could not be extracted: card_suffix, billing_cycle, due_date"
        );
    }

    #[test]
    fn test_threshold_is_configurable() {
        let found = [Field::CardholderName, Field::CardSuffix, Field::AmountDue];
        let issuer = Issuer::Known("AXIS".to_string());
        assert!(ExtractionResult::assemble(issuer.clone(), fields(&found), 2).is_partial());
        assert!(!ExtractionResult::assemble(issuer, fields(&found), 3).is_partial());
    }

    #[test]
    fn test_empty_value_is_not_found() {
        assert_eq!(FieldValue::new(""), FieldValue::NotFound);
        assert_eq!(FieldValue::new(NOT_FOUND), FieldValue::NotFound);
        assert_eq!(FieldValue::from(None), FieldValue::NotFound);
        assert_eq!(FieldValue::NotFound.as_str(), NOT_FOUND);
        assert_eq!(FieldValue::NotFound.value(), None);
    }

    #[test]
    fn test_issuer_sentinel() {
        assert_eq!(Issuer::Unknown.as_str(), "UNKNOWN");
        assert_eq!(Issuer::from(String::new()), Issuer::Unknown);
        assert!(Issuer::from("SBI".to_string()).is_known());
    }

    #[test]
    fn test_serialize_partial() {
        let result = ExtractionResult::assemble(
            Issuer::Known("SBI".to_string()),
            fields(&[Field::CardholderName, Field::CardSuffix]),
            3,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "issuer": "SBI",
                "cardholder_name": "cardholder_name-value",
                "card_suffix": "card_suffix-value",
                "billing_cycle": "Not Found",
                "due_date": "Not Found",
                "amount_due": "Not Found",
                "quality": "partial",
                "missing_fields": ["billing_cycle", "due_date", "amount_due"]
            })
        );
    }

    #[test]
    fn test_deserialize_complete() {
        let json = r#"{
            "issuer": "UNKNOWN",
            "cardholder_name": "JANE DOE",
            "card_suffix": "4321",
            "billing_cycle": "Not Found",
            "due_date": "01-Mar",
            "amount_due": "₹10.00",
            "quality": "complete"
        }"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.issuer, Issuer::Unknown);
        assert_eq!(result.billing_cycle, FieldValue::NotFound);
        assert_eq!(result.quality, Quality::Complete);
    }
}
