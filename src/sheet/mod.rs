//! Sparse sheet model
//!
//! A decoded worksheet is held as an unordered map from cell coordinate to
//! raw value. Absent coordinates are empty cells; there is no implicit zero
//! or empty string. Column iteration is bounded by the fixed A..Z alphabet.

mod decoder;
mod template;

pub use decoder::SheetDecoder;
pub use template::TemplateWriter;

use crate::error::{ExtractError, ExtractResult};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Valid column letters, in visual order.
pub const COLUMN_LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

//==============================================================================
// Column
//==============================================================================

/// A column letter from the fixed A..Z alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u8);

impl Column {
    pub const FIRST: Column = Column(0);
    pub const LAST: Column = Column(COLUMN_LETTERS.len() as u8 - 1);

    /// Column for a letter (case-insensitive), `None` outside A..Z
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        COLUMN_LETTERS
            .iter()
            .position(|&c| c == upper)
            .map(|idx| Column(idx as u8))
    }

    /// Column for a zero-based index, `None` past Z
    pub fn from_index(index: usize) -> Option<Self> {
        (index < COLUMN_LETTERS.len()).then(|| Column(index as u8))
    }

    pub fn letter(self) -> char {
        COLUMN_LETTERS[self.0 as usize]
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The column immediately to the right.
    ///
    /// Fails with `OutOfRange` for the last letter of the alphabet.
    pub fn next(self) -> ExtractResult<Column> {
        if self == Column::LAST {
            return Err(ExtractError::OutOfRange(format!(
                "no column to the right of '{}'",
                self.letter()
            )));
        }
        Ok(Column(self.0 + 1))
    }

    /// All columns, A to Z
    pub fn all() -> impl Iterator<Item = Column> {
        (0..COLUMN_LETTERS.len()).map(|idx| Column(idx as u8))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

//==============================================================================
// Cell coordinate
//==============================================================================

/// A cell coordinate such as `E5`.
///
/// Ordering is row-major (row first, then column), matching the visual layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub column: Column,
}

impl CellRef {
    pub fn new(column: Column, row: u32) -> Self {
        Self { row, column }
    }

    /// Decompose a coordinate string like `"F12"` into column and row
    pub fn parse(coordinate: &str) -> ExtractResult<Self> {
        let mut chars = coordinate.trim().chars();
        let letter = chars
            .next()
            .ok_or_else(|| ExtractError::OutOfRange("empty cell coordinate".to_string()))?;
        let column = Column::from_letter(letter).ok_or_else(|| {
            ExtractError::OutOfRange(format!(
                "column of '{}' is outside A..Z",
                coordinate
            ))
        })?;
        let row: u32 = chars.as_str().parse().map_err(|_| {
            ExtractError::OutOfRange(format!("'{}' has no valid row number", coordinate))
        })?;
        if row == 0 {
            return Err(ExtractError::OutOfRange(format!(
                "'{}' has row 0; rows start at 1",
                coordinate
            )));
        }
        Ok(Self { row, column })
    }

    /// Same row, next column
    pub fn right(self) -> ExtractResult<Self> {
        Ok(Self {
            row: self.row,
            column: self.column.next()?,
        })
    }
}

impl FromStr for CellRef {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

//==============================================================================
// Cell value
//==============================================================================

/// Raw value of a non-empty cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    /// True only for text cells holding exactly `expected`
    pub fn is_text(&self, expected: &str) -> bool {
        self.as_text() == Some(expected)
    }

    /// Numeric reading of the value: numbers as-is, text parsed after trimming
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            // Whole numbers keep their integer form in JSON/YAML output
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

//==============================================================================
// Sheet
//==============================================================================

/// Sparse coordinate → value map of one decoded worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    cells: HashMap<CellRef, CellValue>,
}

impl Sheet {
    /// Build from a raw decoded-cell collection, keeping only cells with a value
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (CellRef, Option<CellValue>)>,
    {
        Self {
            cells: cells
                .into_iter()
                .filter_map(|(cell, value)| value.map(|v| (cell, v)))
                .collect(),
        }
    }

    /// Build from coordinate strings, e.g. `[("A1", "Sep 2023".into())]`
    pub fn from_coordinates<'a, I>(cells: I) -> ExtractResult<Self>
    where
        I: IntoIterator<Item = (&'a str, CellValue)>,
    {
        let mut map = HashMap::new();
        for (coordinate, value) in cells {
            map.insert(CellRef::parse(coordinate)?, value);
        }
        Ok(Self { cells: map })
    }

    /// Value at a coordinate; `None` means the cell is empty
    pub fn get(&self, cell: CellRef) -> Option<&CellValue> {
        self.cells.get(&cell)
    }

    pub fn get_at(&self, column: Column, row: u32) -> Option<&CellValue> {
        self.get(CellRef::new(column, row))
    }

    /// Coordinates of every text cell equal to `text`, in row-major order
    pub fn find_text(&self, text: &str) -> Vec<CellRef> {
        let mut found: Vec<CellRef> = self
            .cells
            .iter()
            .filter(|(_, value)| value.is_text(text))
            .map(|(cell, _)| *cell)
            .collect();
        found.sort();
        found
    }

    /// True if any cell holds `text`
    pub fn contains_text(&self, text: &str) -> bool {
        self.cells.values().any(|value| value.is_text(text))
    }

    /// All cells in row-major order
    pub fn ordered_cells(&self) -> Vec<(CellRef, &CellValue)> {
        let mut cells: Vec<(CellRef, &CellValue)> =
            self.cells.iter().map(|(cell, value)| (*cell, value)).collect();
        cells.sort_by_key(|(cell, _)| *cell);
        cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(CellRef, CellValue)> for Sheet {
    fn from_iter<I: IntoIterator<Item = (CellRef, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
