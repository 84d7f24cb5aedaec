//! Currency rate table builder
//!
//! A rate annotation is a text cell such as `"USD Rate"`. The label is its
//! first token and the rate is read from the cell immediately to the right.

use crate::error::ExtractResult;
use crate::sheet::{CellRef, Sheet};
use crate::types::{RateTable, RateValue};
use tracing::{debug, warn};

const RATE_SUFFIX: &str = "Rate";

/// Scan the sheet for rate annotations.
///
/// Cells are visited in row-major order, so a later duplicate label wins.
/// An annotation in column Z fails with `OutOfRange`.
pub fn build_rate_table(sheet: &Sheet) -> ExtractResult<RateTable> {
    let mut table = RateTable::new();

    for (cell, value) in sheet.ordered_cells() {
        let Some(label) = value.as_text().and_then(rate_label) else {
            continue;
        };

        let neighbour: CellRef = cell.right()?;
        let rate = match sheet.get(neighbour) {
            Some(value) => RateValue::Rate(value.to_string()),
            None => {
                warn!(%cell, label, "rate annotation has no value next to it");
                RateValue::Missing
            }
        };
        debug!(%cell, label, ?rate, "found currency rate");
        table.insert(label, rate);
    }

    Ok(table)
}

/// Label of a `"<LABEL> ... Rate"` annotation, `None` for any other text
fn rate_label(text: &str) -> Option<&str> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next()?;
    match tokens.last() {
        Some(last) if last == RATE_SUFFIX => Some(first),
        _ => None,
    }
}
