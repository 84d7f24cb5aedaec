//! Sample invoice workbook writer
//!
//! Produces a workbook with the layout the extraction pipeline expects:
//! invoicing period in A1, rate annotations near the top, header row 5.

use crate::core::schema::{
    BILL_TO, CUSTOMER_NUMBER, INVOICE_CURRENCY, INVOICE_NUMBER, STATUS, TOTAL_PRICE,
};
use crate::error::{ExtractError, ExtractResult};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Header row of the generated template (1-based)
pub const TEMPLATE_HEADER_ROW: u32 = 5;

const HEADERS: [&str; 7] = [
    "Project",
    BILL_TO,
    CUSTOMER_NUMBER,
    INVOICE_CURRENCY,
    STATUS,
    INVOICE_NUMBER,
    TOTAL_PRICE,
];

/// Writes a sample invoice workbook
pub struct TemplateWriter {
    period: String,
}

impl TemplateWriter {
    /// `period` is written to A1, e.g. `"Sep 2023"`
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
        }
    }

    /// Save the template to an .xlsx file
    pub fn write(&self, output_path: &Path) -> ExtractResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(output_path)
            .map_err(|e| ExtractError::Template(format!("Failed to save workbook: {}", e)))
    }

    /// Render the template to xlsx bytes
    pub fn to_bytes(&self) -> ExtractResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| ExtractError::Template(format!("Failed to render workbook: {}", e)))
    }

    fn build(&self) -> ExtractResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Invoices")
            .map_err(|e| ExtractError::Template(format!("Failed to name worksheet: {}", e)))?;

        self.write_preamble(worksheet)?;
        self.write_table(worksheet)?;

        Ok(workbook)
    }

    /// Period cell and currency rate annotations (label in B, rate in C)
    fn write_preamble(&self, worksheet: &mut Worksheet) -> ExtractResult<()> {
        let rates = [("USD Rate", 1.1), ("EUR Rate", 1.0), ("GBP Rate", 0.86)];

        worksheet.write_string(0, 0, &self.period).map_err(template_err)?;
        for (offset, (label, rate)) in rates.iter().enumerate() {
            let row = offset as u32;
            worksheet.write_string(row, 1, *label).map_err(template_err)?;
            worksheet.write_number(row, 2, *rate).map_err(template_err)?;
        }
        Ok(())
    }

    /// Header row plus two sample data rows, starting in column A
    fn write_table(&self, worksheet: &mut Worksheet) -> ExtractResult<()> {
        let header_format = Format::new().set_bold();
        let header_row = TEMPLATE_HEADER_ROW - 1;

        for (col, name) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(header_row, col as u16, *name, &header_format)
                .map_err(template_err)?;
        }

        let samples: [(&str, &str, f64, &str, &str, &str, f64); 2] = [
            ("Website", "Acme Corp", 10234.0, "USD", "Ready", "INV00000001", 100.0),
            ("Support", "Globex", 20456.0, "EUR", "Done", "INV00000002", 250.0),
        ];
        for (offset, sample) in samples.iter().enumerate() {
            let row = header_row + 1 + offset as u32;
            let (project, bill_to, cust_no, currency, status, invoice, total) = *sample;
            worksheet.write_string(row, 0, project).map_err(template_err)?;
            worksheet.write_string(row, 1, bill_to).map_err(template_err)?;
            worksheet.write_number(row, 2, cust_no).map_err(template_err)?;
            worksheet.write_string(row, 3, currency).map_err(template_err)?;
            worksheet.write_string(row, 4, status).map_err(template_err)?;
            worksheet.write_string(row, 5, invoice).map_err(template_err)?;
            worksheet.write_number(row, 6, total).map_err(template_err)?;
        }
        Ok(())
    }
}

fn template_err(e: rust_xlsxwriter::XlsxError) -> ExtractError {
    ExtractError::Template(format!("Failed to write cell: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellRef, CellValue, SheetDecoder};
    use tempfile::TempDir;

    #[test]
    fn test_template_decodes_with_expected_layout() {
        let bytes = TemplateWriter::new("Sep 2023").to_bytes().unwrap();
        let sheet = SheetDecoder::decode_bytes(bytes).unwrap();

        assert_eq!(
            sheet.get(CellRef::parse("A1").unwrap()),
            Some(&CellValue::from("Sep 2023"))
        );
        assert_eq!(
            sheet.get(CellRef::parse("E5").unwrap()),
            Some(&CellValue::from(STATUS))
        );
        assert_eq!(
            sheet.get(CellRef::parse("F5").unwrap()),
            Some(&CellValue::from(INVOICE_NUMBER))
        );
        assert_eq!(
            sheet.get(CellRef::parse("C1").unwrap()),
            Some(&CellValue::from(1.1))
        );
    }

    #[test]
    fn test_template_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("template.xlsx");

        TemplateWriter::new("Oct 2023").write(&path).unwrap();

        assert!(path.exists());
        let sheet = SheetDecoder::decode_path(&path).unwrap();
        assert!(sheet.contains_text("Oct 2023"));
    }
}
