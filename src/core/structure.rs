//! Structure validation
//!
//! Confirms the anchors, the period cell, and every mandatory column label are
//! present before any extraction happens. Pure predicate over the sheet.

use crate::core::schema::{ValidationSchema, INVOICE_NUMBER, STATUS};
use crate::error::{ExtractError, ExtractResult};
use crate::sheet::{CellRef, CellValue, Column, Sheet};

/// Fixed coordinate of the invoicing period cell (A1)
pub const PERIOD_CELL: CellRef = CellRef {
    row: 1,
    column: Column::FIRST,
};

/// Validate the sheet's structure against the schema
pub fn validate_structure(sheet: &Sheet, schema: &ValidationSchema) -> ExtractResult<()> {
    find_anchor(sheet, STATUS)?;
    find_anchor(sheet, INVOICE_NUMBER)?;
    period_text(sheet)?;

    for field in schema.field_names() {
        if !sheet.contains_text(field) {
            return Err(ExtractError::MissingMandatoryField(field.to_string()));
        }
    }

    Ok(())
}

/// Coordinate of the single cell holding `anchor`
pub fn find_anchor(sheet: &Sheet, anchor: &str) -> ExtractResult<CellRef> {
    let found = sheet.find_text(anchor);
    match found.as_slice() {
        [cell] => Ok(*cell),
        [] => Err(ExtractError::Structural {
            element: anchor.to_string(),
            reason: "anchor cell not found".to_string(),
        }),
        many => Err(ExtractError::Structural {
            element: anchor.to_string(),
            reason: format!(
                "expected exactly one cell, found {} ({})",
                many.len(),
                many.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
            ),
        }),
    }
}

/// Text of the invoicing period cell
pub fn period_text(sheet: &Sheet) -> ExtractResult<&str> {
    match sheet.get(PERIOD_CELL) {
        Some(CellValue::Text(text)) => Ok(text),
        Some(CellValue::Number(_)) => Err(ExtractError::Structural {
            element: format!("invoicing date ({})", PERIOD_CELL),
            reason: "must be text like 'Sep 2023'".to_string(),
        }),
        None => Err(ExtractError::Structural {
            element: format!("invoicing date ({})", PERIOD_CELL),
            reason: "cell is empty".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{BILL_TO, CUSTOMER_NUMBER, INVOICE_CURRENCY, TOTAL_PRICE};

    fn schema() -> ValidationSchema {
        ValidationSchema::standard().unwrap()
    }

    fn well_formed() -> Vec<(&'static str, CellValue)> {
        vec![
            ("A1", CellValue::from("Sep 2023")),
            ("A5", CellValue::from(BILL_TO)),
            ("B5", CellValue::from(CUSTOMER_NUMBER)),
            ("C5", CellValue::from(INVOICE_CURRENCY)),
            ("D5", CellValue::from(TOTAL_PRICE)),
            ("E5", CellValue::from(STATUS)),
            ("F5", CellValue::from(INVOICE_NUMBER)),
        ]
    }

    fn without(coordinate: &str) -> Sheet {
        Sheet::from_coordinates(well_formed().into_iter().filter(|(c, _)| *c != coordinate))
            .unwrap()
    }

    #[test]
    fn test_well_formed_sheet_passes() {
        let sheet = Sheet::from_coordinates(well_formed()).unwrap();
        assert!(validate_structure(&sheet, &schema()).is_ok());
    }

    #[test]
    fn test_missing_status_anchor() {
        let err = validate_structure(&without("E5"), &schema()).unwrap_err();
        match err {
            ExtractError::Structural { element, .. } => assert_eq!(element, "Status"),
            other => panic!("Expected Structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_invoice_anchor() {
        let err = validate_structure(&without("F5"), &schema()).unwrap_err();
        match err {
            ExtractError::Structural { element, .. } => assert_eq!(element, "Invoice #"),
            other => panic!("Expected Structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_anchor() {
        let mut cells = well_formed();
        cells.push(("E20", CellValue::from(STATUS)));
        let sheet = Sheet::from_coordinates(cells).unwrap();

        let err = find_anchor(&sheet, STATUS).unwrap_err();
        assert!(err.to_string().contains("found 2 (E5, E20)"), "got: {err}");
    }

    #[test]
    fn test_period_cell_must_be_text() {
        let err = validate_structure(&without("A1"), &schema()).unwrap_err();
        assert!(matches!(err, ExtractError::Structural { .. }));

        let mut cells = well_formed();
        cells[0] = ("A1", CellValue::from(45170.0));
        let sheet = Sheet::from_coordinates(cells).unwrap();
        assert!(validate_structure(&sheet, &schema()).is_err());
    }

    #[test]
    fn test_missing_mandatory_field() {
        let err = validate_structure(&without("B5"), &schema()).unwrap_err();
        match err {
            ExtractError::MissingMandatoryField(field) => assert_eq!(field, CUSTOMER_NUMBER),
            other => panic!("Expected MissingMandatoryField, got {other:?}"),
        }
    }
}
