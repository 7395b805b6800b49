//! Standardization fitted on a training partition.
//!
//! Each column is rescaled as `(x - mean) / std` with the population standard
//! deviation of the training data's observed values. A column whose spread is
//! indistinguishable from rounding noise is centred only, which leaves it at
//! all zeros, instead of being divided by that noise.

use super::column::{as_f64, observed_values, require_column};
use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnScale {
    pub column: String,
    pub mean: f64,
    pub std: f64,
}

impl ColumnScale {
    fn divisor(&self) -> f64 {
        if self.std > 0.0 { self.std } else { 1.0 }
    }

    pub fn scale(&self, value: f64) -> f64 {
        (value - self.mean) / self.divisor()
    }
}

/// Per-column statistics fitted once and reused for every later partition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    pub columns: Vec<ColumnScale>,
}

/// Spread at or below the float resolution of the mean counts as none.
fn is_zero_variance(mean: f64, std: f64) -> bool {
    std <= f64::EPSILON * mean.abs().max(1.0)
}

impl ScalerState {
    /// Computes mean and population standard deviation for every column.
    ///
    /// Missing values (null or NaN) are ignored when fitting and stay missing
    /// when transforming.
    ///
    /// # Errors
    ///
    /// [`PrepError::EmptyInput`] when `train` has no rows or no columns, and
    /// [`PrepError::NonNumericColumn`] for a non-numeric column.
    pub fn fit(train: &DataFrame) -> Result<Self> {
        if train.height() == 0 || train.width() == 0 {
            return Err(PrepError::EmptyInput(format!(
                "cannot fit scaler on a {} x {} table",
                train.height(),
                train.width()
            )));
        }

        let columns = train
            .get_columns()
            .iter()
            .map(|c| {
                let series = c.as_materialized_series();
                let observed =
                    Float64Chunked::from_vec("observed".into(), observed_values(&as_f64(series)?));
                let mean = observed.mean().unwrap_or(0.0);
                let mut std = observed.std(0).unwrap_or(0.0);
                if is_zero_variance(mean, std) {
                    std = 0.0;
                    tracing::warn!(
                        "Column '{}' has zero variance; it will be centred without scaling",
                        series.name()
                    );
                }
                Ok(ColumnScale {
                    column: series.name().to_string(),
                    mean,
                    std,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns })
    }

    /// Applies the fitted statistics to `df` without refitting.
    ///
    /// Columns of `df` that were not part of the fit are carried over as is.
    ///
    /// # Errors
    ///
    /// [`PrepError::MissingColumn`] when a fitted column is absent from `df`,
    /// [`PrepError::NonNumericColumn`] when it is not numeric.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        for scale in &self.columns {
            require_column(df, &scale.column)?;
        }

        let columns = df
            .get_columns()
            .iter()
            .map(|c| {
                let series = c.as_materialized_series();
                let Some(scale) = self.columns.iter().find(|s| s.column == series.name().as_str())
                else {
                    return Ok(c.clone());
                };
                let scaled: Vec<Option<f64>> = as_f64(series)?
                    .into_iter()
                    .map(|v| v.map(|x| scale.scale(x)))
                    .collect();
                Ok(Column::from(Series::new(series.name().clone(), scaled)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DataFrame::new(columns)?)
    }
}

/// Fits on `train` and applies the same statistics to `train` and `test`.
///
/// # Errors
///
/// See [`ScalerState::fit`] and [`ScalerState::transform`].
pub fn fit_transform(
    train: &DataFrame,
    test: Option<&DataFrame>,
) -> Result<(DataFrame, Option<DataFrame>, ScalerState)> {
    let state = ScalerState::fit(train)?;
    let train_scaled = state.transform(train)?;
    let test_scaled = test.map(|t| state.transform(t)).transpose()?;
    tracing::debug!("Scaled {} feature columns", state.columns.len());
    Ok((train_scaled, test_scaled, state))
}
