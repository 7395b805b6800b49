//! Pipeline execution engine.
//!
//! Runs the fixed cleaning sequence against an input file and writes the
//! result only after every stage has succeeded.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::logic::{
    Bounds, EncodingMap, Shape, ValidationSummary, encode_column, filter_schema, handle_nulls,
    load_table_with_separator, remove_outliers_with, save_table_with_separator, validate_for,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Report produced once per pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Shape of the table as loaded
    pub original_shape: Shape,

    /// Shape after outlier removal
    pub final_shape: Shape,

    pub rows_removed: usize,

    /// Quality report on the cleaned table
    pub validation_summary: ValidationSummary,

    /// Quality report on the table as loaded, before any cleaning
    pub input_validation: ValidationSummary,

    pub outlier_bounds: Bounds,

    pub encoding: EncodingMap,
}

impl PipelineSummary {
    /// One-line description for logs and the CLI
    pub fn summary(&self) -> String {
        format!(
            "Pipeline completed: rows {} -> {} ({} removed), columns {} -> {}, outlier bounds [{:.2}, {:.2}]",
            self.original_shape.0,
            self.final_shape.0,
            self.rows_removed,
            self.original_shape.1,
            self.final_shape.1,
            self.outlier_bounds.lower_bound,
            self.outlier_bounds.upper_bound
        )
    }
}

/// Load → schema filter → null handling → encoding → outlier removal →
/// validation → save.
///
/// # Errors
///
/// The first failing stage's error, unchanged. Nothing is written to
/// `output_path` unless every stage succeeds.
pub fn run_pipeline(
    config: &PipelineConfig,
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<PipelineSummary> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();
    let separator = config.separator_byte()?;

    let raw = load_table_with_separator(input_path, separator)?;
    let original_shape = raw.shape();
    let input_validation = validate_for(&raw, config.crop)?;
    tracing::info!(
        "Loaded {}: {} rows x {} columns",
        input_path.display(),
        original_shape.0,
        original_shape.1
    );

    let filtered = filter_schema(&raw, config.crop)?;
    tracing::info!("Schema filter ({:?}): {:?}", config.crop, filtered.shape());

    let no_nulls = handle_nulls(&filtered, config.null_strategy)?;
    tracing::info!(
        "Null handling ({}): {:?}",
        config.null_strategy,
        no_nulls.shape()
    );

    let (encoded, encoding) = encode_column(&no_nulls, &config.encode_column)?;
    tracing::info!(
        "Encoded '{}' ({} categories): {:?}",
        config.encode_column,
        encoding.len(),
        encoded.shape()
    );

    let (cleaned, outlier_bounds) =
        remove_outliers_with(&encoded, &config.outlier_column, config.iqr_multiplier)?;
    let final_shape = cleaned.shape();
    tracing::info!("Outlier removal: {final_shape:?}");

    let validation_summary = validate_for(&cleaned, config.crop)?;

    save_table_with_separator(&cleaned, output_path, separator)?;
    tracing::info!("Saved cleaned table to {}", output_path.display());

    let summary = PipelineSummary {
        original_shape,
        final_shape,
        rows_removed: original_shape.0 - final_shape.0,
        validation_summary,
        input_validation,
        outlier_bounds,
        encoding,
    };
    tracing::info!("{}", summary.summary());
    Ok(summary)
}
