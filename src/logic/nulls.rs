use super::column::{as_f64, missing_mask, observed_values};
use super::types::NullStrategy;
use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Applies a missing-value strategy, returning a new table.
///
/// `Drop` removes rows with a missing value in any column. The fill
/// strategies impute each numeric column from its own observed values, keep
/// its dtype (integer fills are rounded) and leave non-numeric columns
/// untouched.
///
/// # Errors
///
/// [`PrepError::EmptyInput`] when a numeric column that needs filling has no
/// observed values to compute a statistic from.
pub fn handle_nulls(df: &DataFrame, strategy: NullStrategy) -> Result<DataFrame> {
    let out = match strategy {
        NullStrategy::Drop => drop_missing_rows(df)?,
        NullStrategy::FillMean | NullStrategy::FillMedian => fill_numeric(df, strategy)?,
    };
    tracing::debug!(
        "Null handling ({strategy}): {} -> {} rows",
        df.height(),
        out.height()
    );
    Ok(out)
}

/// Parses `strategy` and applies it.
///
/// # Errors
///
/// [`PrepError::InvalidStrategy`] for anything other than `drop`, `fill_mean`
/// or `fill_median`.
pub fn handle_nulls_named(df: &DataFrame, strategy: &str) -> Result<DataFrame> {
    handle_nulls(df, strategy.parse()?)
}

pub fn missing_counts(df: &DataFrame) -> Result<Vec<(String, usize)>> {
    df.get_columns()
        .iter()
        .map(|c| {
            let series = c.as_materialized_series();
            let count = missing_mask(series)?.into_iter().filter(|m| *m).count();
            Ok((series.name().to_string(), count))
        })
        .collect()
}

fn drop_missing_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        let mask = missing_mask(column.as_materialized_series())?;
        for (k, missing) in keep.iter_mut().zip(mask) {
            *k &= !missing;
        }
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    Ok(df.filter(&mask)?)
}

fn fill_numeric(df: &DataFrame, strategy: NullStrategy) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if !series.dtype().is_primitive_numeric() {
            columns.push(column.clone());
            continue;
        }
        let mask = missing_mask(series)?;
        if !mask.iter().any(|m| *m) {
            columns.push(column.clone());
            continue;
        }

        let values = as_f64(series)?;
        let mut fill = fill_value(&values, strategy).ok_or_else(|| {
            PrepError::EmptyInput(format!(
                "column '{}' has no observed values to impute from",
                series.name()
            ))
        })?;
        if series.dtype().is_integer() {
            fill = fill.round();
        }
        tracing::debug!("Imputing column '{}' with {fill}", series.name());

        let filled: Vec<f64> = values
            .into_iter()
            .zip(&mask)
            .map(|(v, missing)| if *missing { fill } else { v.unwrap_or(fill) })
            .collect();
        let filled = Series::new(series.name().clone(), filled).cast(series.dtype())?;
        columns.push(Column::from(filled));
    }
    Ok(DataFrame::new(columns)?)
}

fn fill_value(values: &Float64Chunked, strategy: NullStrategy) -> Option<f64> {
    let observed = Float64Chunked::from_vec("observed".into(), observed_values(values));
    match strategy {
        NullStrategy::FillMean => observed.mean(),
        NullStrategy::FillMedian => observed.median(),
        NullStrategy::Drop => None,
    }
}
