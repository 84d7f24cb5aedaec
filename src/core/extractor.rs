//! Record extraction
//!
//! Rebuilds tabular semantics from coordinate-keyed cells:
//!
//! 1. Anchor the header row on the "Status" and "Invoice #" cells
//! 2. Harvest column names from the header row (A..Z); every mandatory field
//!    must be among them
//! 3. Admit rows below the header whose status is "Ready" or whose invoice
//!    number looks like `INV` + 8 characters
//! 4. Assemble one record per admitted row, validating mandatory fields and
//!    collecting failures on the record instead of aborting

use crate::core::schema::{ValidationSchema, INVOICE_NUMBER, STATUS};
use crate::core::structure::find_anchor;
use crate::error::{ExtractError, ExtractResult};
use crate::sheet::{CellValue, Column, Sheet};
use crate::types::InvoiceRecord;
use std::collections::BTreeSet;
use tracing::debug;

/// Status value that admits a row
pub const READY_STATUS: &str = "Ready";
/// Prefix of a well-formed invoice number
pub const INVOICE_PREFIX: &str = "INV";
/// Length of a well-formed invoice number, prefix included
pub const INVOICE_NUMBER_LEN: usize = 11;

/// Header row and column layout derived from the anchors
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub header_row: u32,
    pub status_column: Column,
    pub invoice_column: Column,
    /// Header-row columns that carry a name, in A..Z order
    pub columns: Vec<(Column, String)>,
}

impl TableLayout {
    /// Locate the header row from the anchors and harvest column names
    pub fn locate(sheet: &Sheet) -> ExtractResult<Self> {
        let status = find_anchor(sheet, STATUS)?;
        let invoice = find_anchor(sheet, INVOICE_NUMBER)?;

        if status.row != invoice.row {
            return Err(ExtractError::BrokenTableLayout {
                status_row: status.row,
                invoice_row: invoice.row,
            });
        }

        let header_row = status.row;
        let columns = Column::all()
            .filter_map(|column| {
                sheet
                    .get_at(column, header_row)
                    .map(|name| (column, name.to_string()))
            })
            .collect();

        Ok(Self {
            header_row,
            status_column: status.column,
            invoice_column: invoice.column,
            columns,
        })
    }

    /// Fail with `MissingMandatoryField` unless every schema field names a
    /// header-row column. A label elsewhere in the sheet does not count.
    pub fn require_fields(&self, schema: &ValidationSchema) -> ExtractResult<()> {
        for field in schema.field_names() {
            if !self.columns.iter().any(|(_, name)| name == field) {
                return Err(ExtractError::MissingMandatoryField(field.to_string()));
            }
        }
        Ok(())
    }

    pub fn column_name(&self, column: Column) -> Option<&str> {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, name)| name.as_str())
    }
}

/// Extracts invoice records from a structurally valid sheet
pub struct RecordExtractor<'a> {
    sheet: &'a Sheet,
    schema: &'a ValidationSchema,
}

impl<'a> RecordExtractor<'a> {
    pub fn new(sheet: &'a Sheet, schema: &'a ValidationSchema) -> Self {
        Self { sheet, schema }
    }

    /// Run all four steps; one record per admitted row, in row order
    pub fn extract(&self) -> ExtractResult<Vec<InvoiceRecord>> {
        let layout = TableLayout::locate(self.sheet)?;
        layout.require_fields(self.schema)?;
        let rows = self.admitted_rows(&layout);

        let records: Vec<InvoiceRecord> = rows
            .into_iter()
            .map(|row| self.assemble(&layout, row))
            .collect();

        debug!(
            header_row = layout.header_row,
            columns = layout.columns.len(),
            records = records.len(),
            "extracted invoice records"
        );
        Ok(records)
    }

    /// Union of rows admitted by status and rows admitted by invoice number
    pub fn admitted_rows(&self, layout: &TableLayout) -> BTreeSet<u32> {
        let mut rows = BTreeSet::new();

        for (cell, value) in self.sheet.ordered_cells() {
            if cell.row <= layout.header_row {
                continue;
            }
            let by_status = cell.column == layout.status_column && value.is_text(READY_STATUS);
            let by_invoice =
                cell.column == layout.invoice_column && is_invoice_number(value);
            if by_status || by_invoice {
                rows.insert(cell.row);
            }
        }

        rows
    }

    /// Build the record for one row, validating mandatory columns
    fn assemble(&self, layout: &TableLayout, row: u32) -> InvoiceRecord {
        let mut record = InvoiceRecord::new(row);

        for (column, name) in &layout.columns {
            let value = self.sheet.get_at(*column, row);
            if let Some(message) = self.schema.validate(name, value) {
                record.validation_errors.push(message);
            }
            if let Some(value) = value {
                record.fields.insert(name.clone(), value.clone());
            }
        }

        record
    }
}

/// `INV` followed by exactly 8 more characters
fn is_invoice_number(value: &CellValue) -> bool {
    value.as_text().is_some_and(|text| {
        text.chars().count() == INVOICE_NUMBER_LEN && text.starts_with(INVOICE_PREFIX)
    })
}
