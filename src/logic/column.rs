use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Looks up a column by name, mapping absence to [`PrepError::MissingColumn`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(Column::as_materialized_series)
        .map_err(|_| PrepError::MissingColumn(name.to_owned()))
}

/// Returns the named column as `Float64`, rejecting non-numeric dtypes.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let series = require_column(df, name)?;
    as_f64(series)
}

pub fn as_f64(series: &Series) -> Result<Float64Chunked> {
    if !series.dtype().is_primitive_numeric() {
        return Err(PrepError::NonNumericColumn {
            column: series.name().to_string(),
            dtype: series.dtype().to_string(),
        });
    }
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted.f64()?.clone())
}

/// Per-row missing flags: nulls everywhere, plus `NaN` in float columns.
pub fn missing_mask(series: &Series) -> Result<Vec<bool>> {
    if series.dtype().is_float() {
        let ca = as_f64(series)?;
        return Ok(ca
            .into_iter()
            .map(|v| v.is_none_or(f64::is_nan))
            .collect());
    }
    Ok(series.is_null().into_iter().map(|v| v.unwrap_or(true)).collect())
}

/// Non-missing values of a numeric column.
pub fn observed_values(ca: &Float64Chunked) -> Vec<f64> {
    ca.into_iter().flatten().filter(|v| !v.is_nan()).collect()
}
