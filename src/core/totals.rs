//! Invoice total calculation
//!
//! `Invoice Total = trunc(Total Price) × rate(Invoice Currency)`. Lookup
//! misses are recorded on the record and never stop the batch.

use crate::core::schema::{INVOICE_CURRENCY, TOTAL_PRICE};
use crate::types::{InvoiceRecord, InvoiceTotal, RateTable};

/// Set `total` on every record. Same cardinality and order; idempotent.
pub fn apply_totals(records: &mut [InvoiceRecord], rates: &RateTable) {
    for record in records.iter_mut() {
        record.total = Some(compute_total(record, rates));
    }
}

/// Total for a single record
pub fn compute_total(record: &InvoiceRecord, rates: &RateTable) -> InvoiceTotal {
    let currency = record.get(INVOICE_CURRENCY).map(|value| value.to_string());
    let Some(rate) = currency.as_deref().and_then(|code| rates.get(code)) else {
        return InvoiceTotal::UnknownCurrency;
    };
    let Some(rate) = rate.as_f64() else {
        return InvoiceTotal::NoRateValue;
    };
    let Some(price) = record
        .get(TOTAL_PRICE)
        .and_then(|value| value.to_f64())
        .filter(|price| price.is_finite())
    else {
        return InvoiceTotal::InvalidPrice;
    };

    InvoiceTotal::Amount(price.trunc() * rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellValue;
    use crate::types::RateValue;

    fn rates() -> RateTable {
        let mut table = RateTable::new();
        table.insert("USD", RateValue::Rate("1.1".to_string()));
        table.insert("EUR", RateValue::Missing);
        table
    }

    fn record(currency: &str, price: CellValue) -> InvoiceRecord {
        let mut record = InvoiceRecord::new(6);
        record
            .fields
            .insert(INVOICE_CURRENCY.to_string(), CellValue::from(currency));
        record.fields.insert(TOTAL_PRICE.to_string(), price);
        record
    }

    #[test]
    fn test_total_uses_truncated_price() {
        let total = compute_total(&record("USD", CellValue::from(100.9)), &rates());
        assert_eq!(total.as_text(), "110");
    }

    #[test]
    fn test_total_from_text_price() {
        let total = compute_total(&record("USD", CellValue::from("20")), &rates());
        assert_eq!(total.as_text(), "22");
    }

    #[test]
    fn test_unknown_currency_sentinel() {
        let total = compute_total(&record("JPY", CellValue::from(100.0)), &rates());
        assert_eq!(total, InvoiceTotal::UnknownCurrency);
        assert_eq!(total.as_text(), "No such currency defined");
    }

    #[test]
    fn test_missing_currency_field() {
        let mut rec = record("USD", CellValue::from(100.0));
        rec.fields.remove(INVOICE_CURRENCY);
        assert_eq!(compute_total(&rec, &rates()), InvoiceTotal::UnknownCurrency);
    }

    #[test]
    fn test_rate_without_value() {
        let total = compute_total(&record("EUR", CellValue::from(100.0)), &rates());
        assert_eq!(total, InvoiceTotal::NoRateValue);
    }

    #[test]
    fn test_invalid_price() {
        let total = compute_total(&record("USD", CellValue::from("lots")), &rates());
        assert_eq!(total, InvoiceTotal::InvalidPrice);
    }

    #[test]
    fn test_apply_totals_is_idempotent() {
        let mut records = vec![
            record("USD", CellValue::from(100.0)),
            record("JPY", CellValue::from(5.0)),
        ];
        apply_totals(&mut records, &rates());
        let first = records.clone();
        apply_totals(&mut records, &rates());

        assert_eq!(records, first);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total, Some(InvoiceTotal::Amount(100.0 * 1.1)));
        assert_eq!(records[1].total, Some(InvoiceTotal::UnknownCurrency));
    }
}
