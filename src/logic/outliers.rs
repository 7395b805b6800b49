//! IQR outlier detection and removal.
//!
//! Bounds are `[Q1 - k*IQR, Q3 + k*IQR]` with quartiles taken by linear
//! interpolation over the observed (non-missing) values. `k` is
//! [`DEFAULT_IQR_MULTIPLIER`] unless the caller supplies another one.

use super::column::{numeric_column, observed_values};
use super::types::{Bounds, DEFAULT_IQR_MULTIPLIER};
use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Computes IQR bounds for `column` using the default multiplier.
///
/// # Errors
///
/// See [`detect_outliers_with`].
pub fn detect_outliers(df: &DataFrame, column: &str) -> Result<Bounds> {
    detect_outliers_with(df, column, DEFAULT_IQR_MULTIPLIER)
}

/// Computes IQR bounds and the number of values falling outside them.
///
/// # Errors
///
/// [`PrepError::MissingColumn`] if `column` is absent,
/// [`PrepError::NonNumericColumn`] if it is not numeric,
/// [`PrepError::EmptyInput`] if it holds no observed values, and
/// [`PrepError::InvalidMultiplier`] if the multiplier is negative or not
/// finite.
pub fn detect_outliers_with(df: &DataFrame, column: &str, multiplier: f64) -> Result<Bounds> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(PrepError::InvalidMultiplier(multiplier));
    }

    let values = numeric_column(df, column)?;
    let observed = Float64Chunked::from_vec("observed".into(), observed_values(&values));

    let (Some(q1), Some(q3)) = (
        observed.quantile(0.25, QuantileMethod::Linear)?,
        observed.quantile(0.75, QuantileMethod::Linear)?,
    ) else {
        return Err(PrepError::EmptyInput(format!(
            "column '{column}' has no observed values"
        )));
    };

    let iqr = q3 - q1;
    let lower_bound = q1 - multiplier * iqr;
    let upper_bound = q3 + multiplier * iqr;
    let outlier_count = observed
        .into_iter()
        .flatten()
        .filter(|v| *v < lower_bound || *v > upper_bound)
        .count();

    tracing::debug!(
        "Outlier bounds for '{column}': Q1={q1}, Q3={q3}, IQR={iqr}, [{lower_bound}, {upper_bound}], {outlier_count} outliers"
    );

    Ok(Bounds {
        column: column.to_owned(),
        q1,
        q3,
        iqr,
        lower_bound,
        upper_bound,
        outlier_count,
    })
}

/// Per-row outlier flags against previously computed bounds.
///
/// Missing values are never flagged.
///
/// # Errors
///
/// The bounds' column must exist in `df` and be numeric.
pub fn outlier_mask(df: &DataFrame, bounds: &Bounds) -> Result<Vec<bool>> {
    let values = numeric_column(df, &bounds.column)?;
    Ok(values
        .into_iter()
        .map(|v| v.is_some_and(|x| !x.is_nan() && !bounds.contains(x)))
        .collect())
}

/// Keeps only rows whose value lies within freshly computed bounds.
///
/// Rows with a missing value in `column` are dropped as well, since they
/// cannot be shown to be within bounds.
///
/// # Errors
///
/// Same conditions as [`detect_outliers_with`].
pub fn remove_outliers(df: &DataFrame, column: &str) -> Result<(DataFrame, Bounds)> {
    remove_outliers_with(df, column, DEFAULT_IQR_MULTIPLIER)
}

/// [`remove_outliers`] with an explicit IQR multiplier.
///
/// # Errors
///
/// Same conditions as [`detect_outliers_with`].
pub fn remove_outliers_with(
    df: &DataFrame,
    column: &str,
    multiplier: f64,
) -> Result<(DataFrame, Bounds)> {
    let bounds = detect_outliers_with(df, column, multiplier)?;
    let values = numeric_column(df, column)?;
    let keep: Vec<bool> = values
        .into_iter()
        .map(|v| v.is_some_and(|x| bounds.contains(x)))
        .collect();

    let mask = BooleanChunked::from_slice("within_bounds".into(), &keep);
    let filtered = df.filter(&mask)?;

    tracing::info!(
        "Removed {} rows outside [{}, {}] on '{column}'",
        df.height() - filtered.height(),
        bounds.lower_bound,
        bounds.upper_bound
    );
    Ok((filtered, bounds))
}
