use super::column::as_f64;
use super::nulls::missing_counts;
use super::schema::CropSchema;
use super::types::ValidationSummary;
use crate::error::Result;
use polars::prelude::*;
use std::collections::{BTreeMap, HashSet};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Builds a quality snapshot of `df` using the Rice schema's domain columns.
///
/// # Errors
///
/// Propagates Polars failures while casting columns for inspection.
pub fn validate(df: &DataFrame) -> Result<ValidationSummary> {
    validate_for(df, CropSchema::Rice)
}

/// Builds a quality snapshot of `df`.
///
/// The domain counts read the schema's yield, area and production columns; a
/// column that is absent or not numeric contributes zero.
///
/// # Errors
///
/// Propagates Polars failures while casting columns for inspection.
pub fn validate_for(df: &DataFrame, schema: CropSchema) -> Result<ValidationSummary> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let dtypes = df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.dtype().to_string()))
        .collect::<BTreeMap<_, _>>();

    let missing_values = missing_counts(df)?.into_iter().collect::<BTreeMap<_, _>>();

    let summary = ValidationSummary {
        shape: df.shape(),
        columns,
        dtypes,
        missing_values,
        duplicate_rows: count_duplicate_rows(df)?,
        memory_usage_mb: df.estimated_size() as f64 / BYTES_PER_MB,
        negative_yield_count: count_matching(df, schema.yield_column(), |v| v < 0.0)?,
        zero_area_count: count_matching(df, schema.area_column(), |v| v == 0.0)?,
        zero_production_count: count_matching(df, schema.production_column(), |v| v == 0.0)?,
    };

    if summary.negative_yield_count > 0 {
        tracing::warn!("{} rows have a negative yield", summary.negative_yield_count);
    }
    if summary.duplicate_rows > 0 {
        tracing::warn!("{} duplicate rows detected", summary.duplicate_rows);
    }
    Ok(summary)
}

/// Rows identical to an earlier row; the first occurrence is not counted.
pub fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
    let rendered = df
        .get_columns()
        .iter()
        .map(|c| c.as_materialized_series().cast(&DataType::String))
        .collect::<PolarsResult<Vec<_>>>()?;
    let text_columns = rendered
        .iter()
        .map(Series::str)
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
    let mut duplicates = 0;
    for row in 0..df.height() {
        let key: Vec<Option<&str>> = text_columns.iter().map(|ca| ca.get(row)).collect();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    Ok(duplicates)
}

fn count_matching(df: &DataFrame, column: &str, predicate: impl Fn(f64) -> bool) -> Result<usize> {
    let Ok(col) = df.column(column) else {
        return Ok(0);
    };
    let series = col.as_materialized_series();
    if !series.dtype().is_primitive_numeric() {
        return Ok(0);
    }
    Ok(as_f64(series)?
        .into_iter()
        .flatten()
        .filter(|v| predicate(*v))
        .count())
}
