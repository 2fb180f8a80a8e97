use thiserror::Error;

/// Structural failures that stop a filter/export cycle.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Column '{column}' not found in dataset")]
    MissingColumn { column: String },
    #[error("Price range minimum {min} exceeds maximum {max}")]
    InvalidPriceRange { min: f64, max: f64 },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub(crate) fn missing_column(column: &str) -> Self {
        PipelineError::MissingColumn {
            column: column.to_string(),
        }
    }
}
