//! Invoice API Server module
//!
//! HTTP endpoint for workbook uploads.
//! Run with `invoice-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server};
