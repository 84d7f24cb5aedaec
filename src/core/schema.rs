//! Mandatory-field validation schema
//!
//! Each mandatory column label maps to a rule. Rules check a single raw cell
//! value and report a reason on failure; they never reject a whole record.

use crate::error::{ExtractError, ExtractResult};
use crate::sheet::CellValue;
use regex::Regex;

pub const STATUS: &str = "Status";
pub const INVOICE_NUMBER: &str = "Invoice #";
pub const CUSTOMER_NUMBER: &str = "Cust No'";
pub const BILL_TO: &str = "Bill To";
pub const INVOICE_CURRENCY: &str = "Invoice Currency";
pub const TOTAL_PRICE: &str = "Total Price";

/// Constraint on one mandatory field
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Integer with exactly this many digits (number cell or digit text)
    DigitCount(usize),
    /// Text matching the pattern; `description` is used in messages
    Pattern { regex: Regex, description: String },
    /// Text equal to one of the listed values (case-sensitive)
    OneOf(Vec<String>),
    /// Any number, or text that parses as one
    Numeric,
    /// Text with at least one non-whitespace character
    NonEmptyText,
}

impl FieldRule {
    /// Build a pattern rule, propagating regex compile errors
    pub fn pattern(pattern: &str, description: impl Into<String>) -> ExtractResult<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| ExtractError::Config(format!("Invalid field pattern '{}': {}", pattern, e)))?;
        Ok(FieldRule::Pattern {
            regex,
            description: description.into(),
        })
    }

    /// Check a value; `Err` carries the reason
    pub fn check(&self, value: &CellValue) -> Result<(), String> {
        match self {
            FieldRule::DigitCount(digits) => {
                let ok = match value {
                    CellValue::Number(n) => {
                        n.fract() == 0.0 && *n >= 0.0 && format!("{}", n).len() == *digits
                    }
                    CellValue::Text(s) => {
                        s.len() == *digits && s.chars().all(|c| c.is_ascii_digit())
                    }
                };
                if ok {
                    Ok(())
                } else {
                    Err(format!("must be a {}-digit integer, got '{}'", digits, value))
                }
            }
            FieldRule::Pattern { regex, description } => match value.as_text() {
                Some(s) if regex.is_match(s) => Ok(()),
                _ => Err(format!("must be {}, got '{}'", description, value)),
            },
            FieldRule::OneOf(allowed) => match value.as_text() {
                Some(s) if allowed.iter().any(|a| a == s) => Ok(()),
                _ => Err(format!(
                    "must be one of {{{}}}, got '{}'",
                    allowed.join(", "),
                    value
                )),
            },
            FieldRule::Numeric => match value.to_f64() {
                Some(n) if n.is_finite() => Ok(()),
                _ => Err(format!("must be a number, got '{}'", value)),
            },
            FieldRule::NonEmptyText => match value.as_text() {
                Some(s) if !s.trim().is_empty() => Ok(()),
                _ => Err(format!("must be non-empty text, got '{}'", value)),
            },
        }
    }
}

/// Mandatory field name → rule, in declaration order
#[derive(Debug, Clone)]
pub struct ValidationSchema {
    fields: Vec<(String, FieldRule)>,
}

impl ValidationSchema {
    pub fn new(fields: Vec<(String, FieldRule)>) -> Self {
        Self { fields }
    }

    /// The invoice sheet schema
    pub fn standard() -> ExtractResult<Self> {
        Ok(Self::new(vec![
            (
                STATUS.to_string(),
                FieldRule::OneOf(vec!["Ready".to_string(), "Done".to_string()]),
            ),
            (
                INVOICE_NUMBER.to_string(),
                FieldRule::pattern(r"^INV.{8}$", "'INV' followed by 8 characters")?,
            ),
            (CUSTOMER_NUMBER.to_string(), FieldRule::DigitCount(5)),
            (BILL_TO.to_string(), FieldRule::NonEmptyText),
            (
                INVOICE_CURRENCY.to_string(),
                FieldRule::pattern(r"^[A-Z]{3}$", "a 3-letter uppercase currency code")?,
            ),
            (TOTAL_PRICE.to_string(), FieldRule::Numeric),
        ]))
    }

    /// Mandatory field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    pub fn is_mandatory(&self, field: &str) -> bool {
        self.rule(field).is_some()
    }

    /// Validate one field; `None` if valid or not mandatory,
    /// otherwise a `"<field>: <reason>"` message
    pub fn validate(&self, field: &str, value: Option<&CellValue>) -> Option<String> {
        let rule = self.rule(field)?;
        let result = match value {
            Some(value) => rule.check(value),
            None => Err("value is missing".to_string()),
        };
        result.err().map(|reason| format!("{}: {}", field, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ValidationSchema {
        ValidationSchema::standard().unwrap()
    }

    #[test]
    fn test_standard_schema_fields() {
        let s = schema();
        let names: Vec<&str> = s.field_names().collect();
        assert_eq!(
            names,
            vec![STATUS, INVOICE_NUMBER, CUSTOMER_NUMBER, BILL_TO, INVOICE_CURRENCY, TOTAL_PRICE]
        );
    }

    #[test]
    fn test_customer_number_digits() {
        let s = schema();
        assert_eq!(s.validate(CUSTOMER_NUMBER, Some(&CellValue::from(12345.0))), None);
        assert_eq!(s.validate(CUSTOMER_NUMBER, Some(&CellValue::from("54321"))), None);

        let msg = s.validate(CUSTOMER_NUMBER, Some(&CellValue::from(123.0))).unwrap();
        assert!(msg.starts_with("Cust No': "), "got: {msg}");
        assert!(s.validate(CUSTOMER_NUMBER, Some(&CellValue::from(12345.5))).is_some());
        assert!(s.validate(CUSTOMER_NUMBER, Some(&CellValue::from("1234a"))).is_some());
    }

    #[test]
    fn test_currency_code() {
        let s = schema();
        assert_eq!(s.validate(INVOICE_CURRENCY, Some(&CellValue::from("USD"))), None);
        assert!(s.validate(INVOICE_CURRENCY, Some(&CellValue::from("usd"))).is_some());
        assert!(s.validate(INVOICE_CURRENCY, Some(&CellValue::from("USDX"))).is_some());
        assert!(s.validate(INVOICE_CURRENCY, Some(&CellValue::from(840.0))).is_some());
    }

    #[test]
    fn test_status_one_of() {
        let s = schema();
        assert_eq!(s.validate(STATUS, Some(&CellValue::from("Ready"))), None);
        assert_eq!(s.validate(STATUS, Some(&CellValue::from("Done"))), None);
        let msg = s.validate(STATUS, Some(&CellValue::from("ready"))).unwrap();
        assert_eq!(msg, "Status: must be one of {Ready, Done}, got 'ready'");
    }

    #[test]
    fn test_invoice_number_pattern() {
        let s = schema();
        assert_eq!(s.validate(INVOICE_NUMBER, Some(&CellValue::from("INV00000001"))), None);
        assert!(s.validate(INVOICE_NUMBER, Some(&CellValue::from("INV0001"))).is_some());
        assert!(s.validate(INVOICE_NUMBER, Some(&CellValue::from("XNV00000001"))).is_some());
    }

    #[test]
    fn test_total_price_numeric() {
        let s = schema();
        assert_eq!(s.validate(TOTAL_PRICE, Some(&CellValue::from(100.0))), None);
        assert_eq!(s.validate(TOTAL_PRICE, Some(&CellValue::from("99.5"))), None);
        assert!(s.validate(TOTAL_PRICE, Some(&CellValue::from("lots"))).is_some());
    }

    #[test]
    fn test_missing_value_message() {
        let msg = schema().validate(BILL_TO, None).unwrap();
        assert_eq!(msg, "Bill To: value is missing");
    }

    #[test]
    fn test_non_mandatory_field_is_not_validated() {
        assert_eq!(schema().validate("Project", None), None);
        assert!(!schema().is_mandatory("Project"));
    }

    #[test]
    fn test_bad_pattern_is_config_error() {
        let result = FieldRule::pattern("(unclosed", "anything");
        assert!(matches!(result, Err(ExtractError::Config(_))));
    }
}
