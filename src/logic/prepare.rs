//! Turns a cleaned table into scaled train/test partitions.

use super::column::require_column;
use super::io::save_table;
use super::scaling::{ScalerState, fit_transform};
use super::split::{SplitOptions, TrainTestSplit, split};
use crate::error::{PrepError, Result};
use polars::prelude::*;
use std::path::Path;

#[derive(Clone, Debug)]
pub struct PreparedSplit {
    pub split: TrainTestSplit,
    pub scaler: ScalerState,
}

/// Selects features and target, splits, then standardizes with statistics
/// fitted on the training features only.
///
/// With `features = None` every numeric column other than `target` is used.
///
/// # Errors
///
/// [`PrepError::MissingColumn`] / [`PrepError::NonNumericColumn`] for a bad
/// target or feature, [`PrepError::EmptyInput`] when no feature columns remain,
/// plus anything raised by the splitter or scaler.
pub fn prepare_features(
    df: &DataFrame,
    target: &str,
    features: Option<&[String]>,
    options: &SplitOptions,
) -> Result<PreparedSplit> {
    let y = require_column(df, target)?;
    if !y.dtype().is_primitive_numeric() {
        return Err(PrepError::NonNumericColumn {
            column: target.to_owned(),
            dtype: y.dtype().to_string(),
        });
    }

    let feature_cols: Vec<String> = match features {
        Some(cols) => cols.to_vec(),
        None => df
            .get_columns()
            .iter()
            .filter(|c| c.name().as_str() != target && c.dtype().is_primitive_numeric())
            .map(|c| c.name().to_string())
            .collect(),
    };
    if feature_cols.is_empty() {
        return Err(PrepError::EmptyInput(format!(
            "no numeric feature columns besides target '{target}'"
        )));
    }
    for name in &feature_cols {
        require_column(df, name)?;
    }

    let x = df.select(feature_cols.iter().map(String::as_str))?;
    let split = split(&x, y, options)?;
    let (x_train, x_test, scaler) = fit_transform(&split.x_train, Some(&split.x_test))?;
    let x_test = x_test.ok_or_else(|| PrepError::EmptyInput("test partition".to_owned()))?;

    tracing::info!(
        "Prepared {} features: {} train rows, {} test rows",
        feature_cols.len(),
        x_train.height(),
        x_test.height()
    );

    Ok(PreparedSplit {
        split: TrainTestSplit {
            x_train,
            x_test,
            ..split
        },
        scaler,
    })
}

/// Writes the four partitions and the fitted scaler into `dir`.
///
/// # Errors
///
/// I/O or serialization failures.
pub fn write_prepared(prepared: &PreparedSplit, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let split = &prepared.split;
    save_table(&split.x_train, &dir.join("x_train.csv"))?;
    save_table(&split.x_test, &dir.join("x_test.csv"))?;
    save_table(&target_frame(&split.y_train)?, &dir.join("y_train.csv"))?;
    save_table(&target_frame(&split.y_test)?, &dir.join("y_test.csv"))?;

    let scaler = serde_json::to_string_pretty(&prepared.scaler)?;
    std::fs::write(dir.join("scaler.json"), scaler)?;
    Ok(())
}

fn target_frame(y: &Series) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![Column::from(y.clone())])?)
}
