//! Extraction engine: sheet structure, rates, records, totals

pub mod extractor;
pub mod period;
pub mod pipeline;
pub mod rates;
pub mod schema;
pub mod structure;
pub mod totals;

pub use extractor::{RecordExtractor, TableLayout};
pub use period::InvoicingMonth;
pub use pipeline::InvoicePipeline;
pub use schema::{FieldRule, ValidationSchema};
