//! Invoicing period parsing (`"Sep 2023"` → `2023-09`)

use crate::error::{ExtractError, ExtractResult};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Canonical invoicing month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvoicingMonth {
    pub year: i32,
    pub month: u32,
}

impl InvoicingMonth {
    /// Parse `"<Mon> <YYYY>"`, e.g. `"Sep 2023"`
    pub fn parse(text: &str) -> ExtractResult<Self> {
        let invalid = || {
            ExtractError::InvalidPeriod(format!(
                "'{}' does not match '<Mon> <YYYY>' (e.g. 'Sep 2023')",
                text
            ))
        };

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [month, year] = tokens.as_slice() else {
            return Err(invalid());
        };
        // %Y alone accepts any width
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(&format!("1 {} {}", month, year), "%d %b %Y")
            .map_err(|_| invalid())?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl fmt::Display for InvoicingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for InvoicingMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_form() {
        let month = InvoicingMonth::parse("Sep 2023").unwrap();
        assert_eq!(month.to_string(), "2023-09");
        assert_eq!(InvoicingMonth::parse("Dec 1999").unwrap().to_string(), "1999-12");
    }

    #[test]
    fn test_parse_is_case_and_space_tolerant() {
        assert_eq!(
            InvoicingMonth::parse("sep   2023").unwrap(),
            InvoicingMonth::parse("Sep 2023").unwrap()
        );
        assert!(InvoicingMonth::parse(" Oct 2023 ").is_ok());
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(matches!(
            InvoicingMonth::parse("2023-09"),
            Err(ExtractError::InvalidPeriod(_))
        ));
        assert!(InvoicingMonth::parse("Sept 2023").is_err());
        assert!(InvoicingMonth::parse("").is_err());
        assert!(matches!(
            InvoicingMonth::parse("Sep 23"),
            Err(ExtractError::InvalidPeriod(_))
        ));
        assert!(InvoicingMonth::parse("Sep 02023").is_err());
        assert!(InvoicingMonth::parse("Sep 2023 extra").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let month = InvoicingMonth::parse("Jan 2024").unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2024-01\"");
    }
}
