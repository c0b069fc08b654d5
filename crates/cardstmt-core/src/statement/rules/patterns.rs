//! Regex patterns for statement field extraction.
//!
//! Every pattern is case-insensitive and multi-line, and has exactly one
//! capture group holding the field value.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Cardholder name
    pub static ref NAME_LABEL: Regex = Regex::new(
        r"(?im)Name\s*:\s*([A-Z\s]+?)(?:\n|$)"
    ).unwrap();

    pub static ref CARDHOLDER_NAME_LABEL: Regex = Regex::new(
        r"(?im)Cardholder\s*Name\s*:\s*([A-Z\s]+?)(?:\n|$)"
    ).unwrap();

    pub static ref CARD_MEMBER_LABEL: Regex = Regex::new(
        r"(?im)Card\s*Member\s*:\s*([A-Z\s]+?)(?:\n|$)"
    ).unwrap();

    pub static ref SALUTATION: Regex = Regex::new(
        r"(?im)Dear\s+([A-Z\s]+?)(?:,|\n)"
    ).unwrap();

    // Card number suffix (XXXX XXXX XXXX 1234, Card No: XXXX 1234, ending in 1234)
    pub static ref MASKED_CARD_NUMBER: Regex = Regex::new(
        r"(?im)(?:XXXX|xxxx|\*{4})[\s-]*(?:XXXX|xxxx|\*{4})[\s-]*(?:XXXX|xxxx|\*{4})[\s-]*(\d{4})"
    ).unwrap();

    pub static ref CARD_NUMBER_LABEL: Regex = Regex::new(
        r"(?im)Card\s*(?:Number|No\.?)\s*:?\s*(?:XXXX|xxxx|\*{4})[\s-]*(\d{4})"
    ).unwrap();

    pub static ref CARD_ENDING_IN: Regex = Regex::new(
        r"(?im)ending\s*(?:in\s*)?(\d{4})"
    ).unwrap();

    // Billing cycle
    pub static ref STATEMENT_PERIOD: Regex = Regex::new(
        r"(?im)Statement\s*Period\s*:?\s*([^\n]+)"
    ).unwrap();

    pub static ref BILLING_PERIOD: Regex = Regex::new(
        r"(?im)Billing\s*(?:Period|Cycle)\s*:?\s*([^\n]+)"
    ).unwrap();

    pub static ref STATEMENT_DATE: Regex = Regex::new(
        r"(?im)Statement\s*Date\s*:?\s*([^\n]+)"
    ).unwrap();

    // Payment due date
    pub static ref PAYMENT_DUE_DATE: Regex = Regex::new(
        r"(?im)Payment\s*Due\s*Date\s*:?\s*([^\n]+)"
    ).unwrap();

    pub static ref DUE_DATE: Regex = Regex::new(
        r"(?im)Due\s*Date\s*:?\s*([^\n]+)"
    ).unwrap();

    pub static ref PAY_BY: Regex = Regex::new(
        r"(?im)Pay\s*By\s*:?\s*([^\n]+)"
    ).unwrap();

    // Amount due (1,23,456.78 with optional rupee sign)
    pub static ref TOTAL_AMOUNT_DUE: Regex = Regex::new(
        r"(?im)Total\s*Amount\s*Due\s*:?\s*₹?\s*([\d,]+\.?\d{0,2})"
    ).unwrap();

    pub static ref TOTAL_DUE: Regex = Regex::new(
        r"(?im)Total\s*Due\s*:?\s*₹?\s*([\d,]+\.?\d{0,2})"
    ).unwrap();

    pub static ref AMOUNT_PAYABLE: Regex = Regex::new(
        r"(?im)Amount\s*Payable\s*:?\s*₹?\s*([\d,]+\.?\d{0,2})"
    ).unwrap();

    pub static ref CLOSING_BALANCE: Regex = Regex::new(
        r"(?im)Closing\s*Balance\s*:?\s*₹?\s*([\d,]+\.?\d{0,2})"
    ).unwrap();
}
