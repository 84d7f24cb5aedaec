use crate::config::{ExtractConfig, MissingValuePolicy};
use crate::core::rates::build_rate_table;
use crate::core::structure::{period_text, validate_structure};
use crate::core::{InvoicePipeline, InvoicingMonth, TableLayout, ValidationSchema};
use crate::error::ExtractResult;
use crate::sheet::{SheetDecoder, TemplateWriter};
use crate::types::{InvoiceReport, RateValue};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Report serialization format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render a report in the requested format
pub fn render_report(
    report: &InvoiceReport,
    format: OutputFormat,
    policy: MissingValuePolicy,
) -> ExtractResult<String> {
    let value = report.to_json(policy);
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)?,
        OutputFormat::Yaml => serde_yaml::to_string(&value)?,
    })
}

/// Execute the extract command
///
/// Status lines go to stderr so the report on stdout can be piped.
pub fn extract(
    file: PathBuf,
    month: String,
    format: OutputFormat,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    missing_values: Option<MissingValuePolicy>,
) -> ExtractResult<()> {
    eprintln!("{}", "🧾 Invoice Extract - Extracting invoices".bold().green());
    eprintln!("   File:  {}", file.display());
    eprintln!("   Month: {}\n", month);

    let mut extract_config = ExtractConfig::load(config.as_deref())?;
    if let Some(policy) = missing_values {
        extract_config.missing_values = policy;
    }

    let sheet = SheetDecoder::decode_path(&file)?;
    let schema = ValidationSchema::standard()?;

    let report = match InvoicePipeline::new(&schema).run(&sheet, &month) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", format!("❌ Extraction failed: {e}").bold().red());
            return Err(e);
        }
    };

    let rendered = render_report(&report, format, extract_config.missing_values)?;

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            eprintln!("   Report: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    let invalid = report.invalid_count();
    eprintln!(
        "   {} invoices, {} currency rates",
        report.invoices.len(),
        report.currency_rates.len()
    );
    if invalid > 0 {
        eprintln!(
            "{}",
            format!("⚠️  {} invoices have validation errors", invalid).yellow()
        );
    } else {
        eprintln!("{}", "✅ All invoices valid".bold().green());
    }

    Ok(())
}

/// Execute the check command: structure only, no records
pub fn check(file: PathBuf) -> ExtractResult<()> {
    println!("{}", "✅ Checking sheet structure".bold().green());
    println!("   File: {}\n", file.display());

    let sheet = SheetDecoder::decode_path(&file)?;
    let schema = ValidationSchema::standard()?;

    if let Err(e) = validate_structure(&sheet, &schema) {
        println!("{}", format!("❌ {e}").bold().red());
        return Err(e);
    }

    let layout = TableLayout::locate(&sheet)?;
    let period = InvoicingMonth::parse(period_text(&sheet)?)?;
    let rates = build_rate_table(&sheet)?;

    println!("   {} cells", sheet.len());
    println!("   Invoicing month: {}", period.to_string().bright_blue());
    println!(
        "   Header row: {} (Status in {}, Invoice # in {})",
        layout.header_row, layout.status_column, layout.invoice_column
    );
    println!("   Columns:");
    for (column, name) in &layout.columns {
        let marker = if schema.is_mandatory(name) { "*" } else { " " };
        println!("     {}{} {}", column, marker, name);
    }
    println!("   Currency rates:");
    if rates.is_empty() {
        println!("     {}", "(none)".yellow());
    }
    for (label, rate) in rates.iter() {
        match rate {
            RateValue::Rate(value) => println!("     {} = {}", label, value),
            RateValue::Missing => println!("     {} = {}", label, "no value".yellow()),
        }
    }

    println!("\n{}", "✅ Sheet structure is valid".bold().green());
    Ok(())
}

/// Execute the template command
pub fn template(output: &Path, month: String) -> ExtractResult<()> {
    println!("{}", "🧾 Invoice Extract - Writing template".bold().green());

    // Reject a bad period before writing anything
    InvoicingMonth::parse(&month)?;
    TemplateWriter::new(month).write(output)?;

    println!("   Template: {}", output.display());
    Ok(())
}
