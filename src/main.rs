use clap::{Parser, Subcommand};
use invoice_extract::cli::{self, OutputFormat};
use invoice_extract::config::MissingValuePolicy;
use invoice_extract::error::ExtractResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "invoice-extract")]
#[command(about = "Extract validated invoice records from a spreadsheet.")]
#[command(long_about = "Invoice Extract - validated invoice records from sparse spreadsheets

The invoice table is found by its 'Status' and 'Invoice #' header cells,
not by fixed positions. Rows below the header are extracted when their
status is 'Ready' or their invoice number looks like INV + 8 characters.

COMMANDS:
  extract   - Extract invoices to JSON/YAML
  check     - Check sheet structure without extracting
  template  - Write a sample invoice workbook

EXAMPLES:
  invoice-extract extract invoices.xlsx --month \"Sep 2023\"
  invoice-extract extract invoices.xlsx -m \"Sep 2023\" -f yaml -o report.yaml
  invoice-extract check invoices.xlsx
  invoice-extract template sample.xlsx --month \"Oct 2023\"")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Extract invoices from the first worksheet of a workbook.

The sheet's own invoicing date (cell A1, e.g. 'Sep 2023') must match --month.

Every admitted row becomes one record. Invalid mandatory fields are listed
under 'validationErrors' on that record; they never drop the record.
'Invoice Total' is Total Price (truncated) times the rate found next to
a '<CURRENCY> Rate' cell.")]
    /// Extract invoices to JSON or YAML
    Extract {
        /// Path to the workbook (.xlsx, .xls, .ods)
        file: PathBuf,

        /// Expected invoicing month, e.g. "Sep 2023"
        #[arg(short, long)]
        month: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML configuration file
        #[arg(short, long, env = "INVOICE_CONFIG")]
        config: Option<PathBuf>,

        /// How failed lookups are rendered (overrides the config file)
        #[arg(long, value_enum)]
        missing_values: Option<MissingValuePolicy>,
    },

    /// Check sheet structure without extracting
    Check {
        /// Path to the workbook
        file: PathBuf,
    },

    /// Write a sample invoice workbook
    Template {
        /// Output .xlsx path
        output: PathBuf,

        /// Invoicing month written to A1
        #[arg(short, long, default_value = "Sep 2023")]
        month: String,
    },
}

fn main() -> ExtractResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            month,
            format,
            output,
            config,
            missing_values,
        } => cli::extract(file, month, format, output, config, missing_values),

        Commands::Check { file } => cli::check(file),

        Commands::Template { output, month } => cli::template(&output, month),
    }
}
