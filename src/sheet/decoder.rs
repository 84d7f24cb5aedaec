//! Workbook decoding - xlsx/xls/ods → Sheet

use super::{CellRef, CellValue, Column, Sheet};
use crate::error::{ExtractError, ExtractResult};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Decodes the first worksheet of a workbook into a sparse `Sheet`
pub struct SheetDecoder;

impl SheetDecoder {
    /// Decode an uploaded workbook held in memory
    pub fn decode_bytes(bytes: Vec<u8>) -> ExtractResult<Sheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| ExtractError::Decode(format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ExtractError::Decode("Workbook has no worksheets".to_string()))?
            .map_err(|e| ExtractError::Decode(format!("Failed to read worksheet: {}", e)))?;

        Ok(Self::range_to_sheet(&range))
    }

    /// Decode a workbook file; the format is picked from the extension
    pub fn decode_path<P: AsRef<Path>>(path: P) -> ExtractResult<Sheet> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            ExtractError::Decode(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ExtractError::Decode(format!("{} has no worksheets", path.display())))?
            .map_err(|e| ExtractError::Decode(format!("Failed to read worksheet: {}", e)))?;

        Ok(Self::range_to_sheet(&range))
    }

    /// Convert a calamine range (0-based, offset by its start) to 1-based coordinates
    fn range_to_sheet(range: &Range<Data>) -> Sheet {
        let Some((start_row, start_col)) = range.start() else {
            return Sheet::default();
        };

        let cells = range.used_cells().filter_map(|(row, col, data)| {
            let abs_col = start_col as usize + col;
            let Some(column) = Column::from_index(abs_col) else {
                debug!(row = start_row as usize + row + 1, col = abs_col, "skipping cell beyond column Z");
                return None;
            };
            let cell = CellRef::new(column, start_row + row as u32 + 1);
            Some((cell, Self::convert(data)))
        });

        Sheet::from_cells(cells)
    }

    /// Map a calamine value to a cell value; `None` for empty and error cells
    fn convert(data: &Data) -> Option<CellValue> {
        match data {
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Float(f) => Some(CellValue::Number(*f)),
            Data::Int(i) => Some(CellValue::Number(*i as f64)),
            Data::Bool(b) => Some(CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string())),
            Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
            Data::Error(_) | Data::Empty => None,
        }
    }
}
