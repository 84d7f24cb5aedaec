//! Extraction pipeline
//!
//! structure → period check → rate table → records → totals. Runs
//! synchronously; each call owns its sheet, rate table and records.

use crate::core::extractor::RecordExtractor;
use crate::core::period::InvoicingMonth;
use crate::core::rates::build_rate_table;
use crate::core::schema::ValidationSchema;
use crate::core::structure::{period_text, validate_structure};
use crate::core::totals::apply_totals;
use crate::error::{ExtractError, ExtractResult};
use crate::sheet::Sheet;
use crate::types::{InvoiceReport, InvoiceTotal};
use tracing::{info, warn};

/// Runs the extraction stages against a shared, read-only schema
pub struct InvoicePipeline<'a> {
    schema: &'a ValidationSchema,
}

impl<'a> InvoicePipeline<'a> {
    pub fn new(schema: &'a ValidationSchema) -> Self {
        Self { schema }
    }

    /// Process one decoded sheet.
    ///
    /// `expected_period` is the caller's `"<Mon> <YYYY>"`; a different period
    /// in the sheet's date cell fails with `PeriodMismatch` before any records
    /// are built.
    pub fn run(&self, sheet: &Sheet, expected_period: &str) -> ExtractResult<InvoiceReport> {
        let expected = InvoicingMonth::parse(expected_period)?;

        validate_structure(sheet, self.schema)?;

        let declared = InvoicingMonth::parse(period_text(sheet)?)?;
        if declared != expected {
            return Err(ExtractError::PeriodMismatch {
                expected: expected.to_string(),
                found: declared.to_string(),
            });
        }

        let rates = build_rate_table(sheet)?;
        let mut invoices = RecordExtractor::new(sheet, self.schema).extract()?;
        apply_totals(&mut invoices, &rates);

        let report = InvoiceReport {
            invoicing_month: declared,
            currency_rates: rates,
            invoices,
        };
        self.log_summary(&report);

        Ok(report)
    }

    fn log_summary(&self, report: &InvoiceReport) {
        let unknown_currencies = report
            .invoices
            .iter()
            .filter(|r| r.total == Some(InvoiceTotal::UnknownCurrency))
            .count();
        if unknown_currencies > 0 {
            warn!(count = unknown_currencies, "invoices with undefined currency");
        }
        info!(
            month = %report.invoicing_month,
            rates = report.currency_rates.len(),
            invoices = report.invoices.len(),
            invalid = report.invalid_count(),
            "processed invoice sheet"
        );
    }
}
