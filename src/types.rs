use crate::config::MissingValuePolicy;
use crate::core::period::InvoicingMonth;
use crate::sheet::CellValue;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Sentinel for a rate annotation without a value next to it
pub const NO_VALUE: &str = "No value";
/// Sentinel for an invoice currency missing from the rate table
pub const NO_SUCH_CURRENCY: &str = "No such currency defined";
/// Sentinel for a total price that is not a number
pub const INVALID_PRICE: &str = "Invalid Total Price";

/// Output key of the per-record error list
pub const VALIDATION_ERRORS_KEY: &str = "validationErrors";
/// Output key of the computed total
pub const INVOICE_TOTAL_KEY: &str = "Invoice Total";

//==============================================================================
// Rate Table
//==============================================================================

/// Rate read next to a `"<CODE> Rate"` annotation
#[derive(Debug, Clone, PartialEq)]
pub enum RateValue {
    /// Textual form of the neighbouring cell
    Rate(String),
    /// The neighbouring cell was empty
    Missing,
}

impl RateValue {
    /// Numeric rate, if present and parseable
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RateValue::Rate(text) => text.trim().parse().ok(),
            RateValue::Missing => None,
        }
    }

    fn render(&self, policy: MissingValuePolicy) -> Value {
        match self {
            RateValue::Rate(text) => Value::String(text.clone()),
            RateValue::Missing => policy.sentinel(NO_VALUE),
        }
    }
}

/// Currency label → rate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<String, RateValue>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rate for a label
    pub fn insert(&mut self, label: impl Into<String>, rate: RateValue) {
        self.rates.insert(label.into(), rate);
    }

    pub fn get(&self, label: &str) -> Option<&RateValue> {
        self.rates.get(label)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RateValue)> {
        self.rates.iter()
    }

    pub fn to_json(&self, policy: MissingValuePolicy) -> Value {
        Value::Object(
            self.rates
                .iter()
                .map(|(label, rate)| (label.clone(), rate.render(policy)))
                .collect(),
        )
    }
}

//==============================================================================
// Invoice Record
//==============================================================================

/// Result of the total calculation for one record
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceTotal {
    Amount(f64),
    /// Invoice currency has no entry in the rate table
    UnknownCurrency,
    /// Currency is listed but its rate cell was empty or not a number
    NoRateValue,
    /// Total Price is missing or not a number
    InvalidPrice,
}

impl InvoiceTotal {
    /// Text form: the amount rounded to cents, or the matching sentinel
    pub fn as_text(&self) -> String {
        match self {
            InvoiceTotal::Amount(amount) => format_amount(*amount),
            InvoiceTotal::UnknownCurrency => NO_SUCH_CURRENCY.to_string(),
            InvoiceTotal::NoRateValue => NO_VALUE.to_string(),
            InvoiceTotal::InvalidPrice => INVALID_PRICE.to_string(),
        }
    }

    fn render(&self, policy: MissingValuePolicy) -> Value {
        match self {
            InvoiceTotal::Amount(_) => Value::String(self.as_text()),
            _ => policy.sentinel(&self.as_text()),
        }
    }
}

/// Round to two decimals and print without trailing zeros (`110`, `12.5`)
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    // Avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// One extracted invoice row
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRecord {
    /// Sheet row the record came from
    pub row: u32,
    /// Column name → raw cell value (empty cells are absent)
    pub fields: BTreeMap<String, CellValue>,
    /// `"<field>: <reason>"` messages, in column order
    pub validation_errors: Vec<String>,
    /// Set by the total calculator
    pub total: Option<InvoiceTotal>,
}

impl InvoiceRecord {
    pub fn new(row: u32) -> Self {
        Self {
            row,
            fields: BTreeMap::new(),
            validation_errors: Vec::new(),
            total: None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }

    pub fn to_json(&self, policy: MissingValuePolicy) -> Value {
        let mut object: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), json!(value)))
            .collect();
        object.insert(
            VALIDATION_ERRORS_KEY.to_string(),
            json!(self.validation_errors),
        );
        if let Some(total) = &self.total {
            object.insert(INVOICE_TOTAL_KEY.to_string(), total.render(policy));
        }
        Value::Object(object)
    }
}

//==============================================================================
// Report
//==============================================================================

/// Terminal artifact of one extraction request
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceReport {
    pub invoicing_month: InvoicingMonth,
    pub currency_rates: RateTable,
    pub invoices: Vec<InvoiceRecord>,
}

impl InvoiceReport {
    /// Records with at least one validation error
    pub fn invalid_count(&self) -> usize {
        self.invoices.iter().filter(|r| !r.is_valid()).count()
    }

    /// Outbound shape: `InvoicingMonth`, `currencyRates`, `invoicesData`
    pub fn to_json(&self, policy: MissingValuePolicy) -> Value {
        json!({
            "InvoicingMonth": self.invoicing_month,
            "currencyRates": self.currency_rates.to_json(policy),
            "invoicesData": self
                .invoices
                .iter()
                .map(|record| record.to_json(policy))
                .collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0 * 1.1), "110");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(3.14159), "3.14");
        assert_eq!(format_amount(-0.001), "0");
    }

    #[test]
    fn test_rate_value_as_f64() {
        assert_eq!(RateValue::Rate("1.1".to_string()).as_f64(), Some(1.1));
        assert_eq!(RateValue::Rate("n/a".to_string()).as_f64(), None);
        assert_eq!(RateValue::Missing.as_f64(), None);
    }

    #[test]
    fn test_rate_table_json_sentinel_policy() {
        let mut table = RateTable::new();
        table.insert("USD", RateValue::Rate("1.1".to_string()));
        table.insert("EUR", RateValue::Missing);

        assert_eq!(
            table.to_json(MissingValuePolicy::Sentinel),
            json!({"USD": "1.1", "EUR": "No value"})
        );
        assert_eq!(
            table.to_json(MissingValuePolicy::Null),
            json!({"USD": "1.1", "EUR": null})
        );
    }

    #[test]
    fn test_invoice_total_text() {
        assert_eq!(InvoiceTotal::Amount(110.0).as_text(), "110");
        assert_eq!(InvoiceTotal::UnknownCurrency.as_text(), NO_SUCH_CURRENCY);
        assert_eq!(InvoiceTotal::NoRateValue.as_text(), NO_VALUE);
    }

    #[test]
    fn test_record_json_shape() {
        let mut record = InvoiceRecord::new(6);
        record
            .fields
            .insert("Invoice #".to_string(), CellValue::from("INV00000001"));
        record
            .fields
            .insert("Total Price".to_string(), CellValue::from(100.0));
        record.validation_errors.push("Bill To: value is missing".to_string());
        record.total = Some(InvoiceTotal::UnknownCurrency);

        assert_eq!(
            record.to_json(MissingValuePolicy::Sentinel),
            json!({
                "Invoice #": "INV00000001",
                "Total Price": 100,
                "validationErrors": ["Bill To: value is missing"],
                "Invoice Total": "No such currency defined",
            })
        );
        assert_eq!(
            record.to_json(MissingValuePolicy::Null)["Invoice Total"],
            Value::Null
        );
    }

    #[test]
    fn test_record_without_total_omits_key() {
        let record = InvoiceRecord::new(6);
        let value = record.to_json(MissingValuePolicy::Sentinel);
        assert!(value.get(INVOICE_TOTAL_KEY).is_none());
        assert_eq!(value[VALIDATION_ERRORS_KEY], json!([]));
    }
}
