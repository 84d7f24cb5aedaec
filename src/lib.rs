//! Invoice Extract - validated invoice records from sparse spreadsheets
//!
//! This library reads a decoded worksheet as a map of cell coordinates to
//! values, finds the invoice table by its anchor cells, validates every
//! admitted row against a mandatory-field schema and computes totals from
//! currency-rate annotations found in the same sheet.
//!
//! # Features
//!
//! - Header discovery from "Status" / "Invoice #" anchors, no fixed layout
//! - Per-record validation errors; one bad field never drops a record
//! - Currency rate lookup from `"<CODE> Rate"` annotations
//! - xlsx/xls/ods decoding, CLI and HTTP API
//!
//! # Example
//!
//! ```no_run
//! use invoice_extract::config::MissingValuePolicy;
//! use invoice_extract::core::{InvoicePipeline, ValidationSchema};
//! use invoice_extract::sheet::SheetDecoder;
//!
//! let sheet = SheetDecoder::decode_path("invoices.xlsx")?;
//! let schema = ValidationSchema::standard()?;
//! let report = InvoicePipeline::new(&schema).run(&sheet, "Sep 2023")?;
//!
//! println!("Invoices: {}", report.invoices.len());
//! println!("{}", report.to_json(MissingValuePolicy::Sentinel));
//! # Ok::<(), invoice_extract::error::ExtractError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod sheet;
pub mod types;

// Re-export commonly used types
pub use error::{ExtractError, ExtractResult};
pub use sheet::{CellRef, CellValue, Column, Sheet};
pub use types::{InvoiceRecord, InvoiceReport, InvoiceTotal, RateTable, RateValue};
