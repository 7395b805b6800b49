//! Centralized error handling for cropprep.
//!
//! Every failure a stage can raise is a variant of [`PrepError`]. Stages return
//! the crate-wide [`Result`] alias and use `?` to propagate; nothing is retried
//! or swallowed internally, so the caller sees the error of the stage that
//! detected the problem.
//!
//! ```
//! use cropprep::error::PrepError;
//!
//! fn describe(err: &PrepError) -> &'static str {
//!     match err {
//!         PrepError::NotFound(_) | PrepError::EmptyContent(_) => "bad input file",
//!         PrepError::MissingColumns(_) => "schema violation",
//!         _ => "processing failure",
//!     }
//! }
//! ```

use std::path::PathBuf;

/// Main error type for cropprep operations.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// Input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists but produced zero rows or zero columns.
    #[error("Input file is empty: {}", .0.display())]
    EmptyContent(PathBuf),

    /// One or more required schema columns are absent.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Unknown missing-value strategy.
    #[error("Invalid missing-value strategy '{0}' (expected drop, fill_mean or fill_median)")]
    InvalidStrategy(String),

    /// A single target column is absent.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// A column that must be numeric is not.
    #[error("Column '{column}' is not numeric (found {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    /// Test fraction outside the open interval (0, 1).
    #[error("Invalid test size {0}: must be strictly between 0 and 1")]
    InvalidTestSize(f64),

    /// IQR multiplier that is negative or not finite.
    #[error("Invalid IQR multiplier {0}: must be a finite non-negative number")]
    InvalidMultiplier(f64),

    /// Features and target disagree on row count.
    #[error("Length mismatch: features have {features} rows, target has {target}")]
    LengthMismatch { features: usize, target: usize },

    /// An operation received nothing to work on.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A stored encoding map met a label it was not built from.
    #[error("Column '{column}' contains category '{label}' not present in the encoding map")]
    UnseenCategory { column: String, label: String },

    /// Field separator that cannot be used for CSV.
    #[error("Invalid CSV separator {0:?}: must be a single ASCII character")]
    InvalidSeparator(char),

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data processing errors raised by Polars
    #[error("Data processing error: {0}")]
    DataProcessing(#[from] polars::error::PolarsError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for cropprep operations.
pub type Result<T> = std::result::Result<T, PrepError>;
