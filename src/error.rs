use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Structural error: '{element}' {reason}")]
    Structural { element: String, reason: String },

    #[error("Missing mandatory field: '{0}' is not a column label in the sheet")]
    MissingMandatoryField(String),

    #[error("Broken table layout: 'Status' is on row {status_row} but 'Invoice #' is on row {invoice_row}")]
    BrokenTableLayout { status_row: u32, invoice_row: u32 },

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Invoicing period mismatch: expected {expected}, sheet declares {found}")]
    PeriodMismatch { expected: String, found: String },

    #[error("Invalid invoicing period: {0}")]
    InvalidPeriod(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// True for errors caused by the shape of the sheet or the requested
    /// period, as opposed to I/O or decoding failures.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ExtractError::Structural { .. }
                | ExtractError::MissingMandatoryField(_)
                | ExtractError::BrokenTableLayout { .. }
                | ExtractError::OutOfRange(_)
                | ExtractError::PeriodMismatch { .. }
                | ExtractError::InvalidPeriod(_)
        )
    }
}
