//! Invoice API Server binary
//!
//! HTTP API for invoice extraction from uploaded workbooks.

use clap::Parser;
use invoice_extract::api::{run_api_server, server::ApiConfig, server::DEFAULT_MAX_UPLOAD_BYTES};
use invoice_extract::config::ExtractConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "invoice-server")]
#[command(version)]
#[command(about = "Invoice API Server - extract validated invoices from uploaded spreadsheets")]
#[command(long_about = r#"
Invoice API Server

Endpoints:
  - POST /api/v1/invoices  - Extract invoices from a workbook upload
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

The upload is multipart/form-data with two parts:
  file            the workbook (.xlsx, .xls, .ods)
  invoicingMonth  expected period, e.g. "Sep 2023"

Example usage:
  invoice-server                           # Start on localhost:8080
  invoice-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/invoices \
    -F "file=@invoices.xlsx" \
    -F "invoicingMonth=Sep 2023"
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "INVOICE_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "INVOICE_PORT")]
    port: u16,

    /// Maximum upload size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "INVOICE_MAX_UPLOAD")]
    max_upload_bytes: usize,

    /// YAML configuration file
    #[arg(short, long, env = "INVOICE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_bytes,
        extract: ExtractConfig::load(args.config.as_deref())?,
    };

    run_api_server(config).await
}
