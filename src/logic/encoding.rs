use super::column::{missing_mask, require_column};
use super::naming::encoded_column_name;
use super::types::UNKNOWN_LABEL;
use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Label-to-code mapping produced by one encoding call.
///
/// Codes are dense (`0..k`) and assigned in lexicographic label order. The
/// map can be serialized and reapplied to other tables with [`EncodingMap::apply`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingMap {
    pub column: String,
    pub encoded_column: String,
    pub codes: BTreeMap<String, u32>,
}

impl EncodingMap {
    fn build(column: &str, labels: &[String]) -> Self {
        let distinct: BTreeSet<&String> = labels.iter().collect();
        let codes = distinct
            .into_iter()
            .zip(0u32..)
            .map(|(label, code)| (label.clone(), code))
            .collect();
        Self {
            column: column.to_owned(),
            encoded_column: encoded_column_name(column),
            codes,
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn code(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Adds the encoded column to `df` using this mapping.
    ///
    /// # Errors
    ///
    /// [`PrepError::MissingColumn`] if the source column is absent, and
    /// [`PrepError::UnseenCategory`] for a label the map does not contain.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let labels = labels(df, &self.column)?;
        let codes = labels
            .iter()
            .map(|label| {
                self.code(label).ok_or_else(|| PrepError::UnseenCategory {
                    column: self.column.clone(),
                    label: label.clone(),
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        let mut out = df.clone();
        out.with_column(Series::new(self.encoded_column.as_str().into(), codes))?;
        Ok(out)
    }
}

/// Label-encodes `column`, appending `<snake_case(column)>_encoded`.
///
/// Missing values become the label `"Unknown"` before codes are assigned, so
/// the encoded column is never missing. The source column is kept.
///
/// # Errors
///
/// [`PrepError::MissingColumn`] if `column` is absent.
pub fn encode_column(df: &DataFrame, column: &str) -> Result<(DataFrame, EncodingMap)> {
    let labels = labels(df, column)?;
    let map = EncodingMap::build(column, &labels);
    let encoded = map.apply(df)?;
    tracing::debug!(
        "Encoded '{column}' into '{}' with {} categories",
        map.encoded_column,
        map.len()
    );
    Ok((encoded, map))
}

/// Text labels of a column with missing values (null or `NaN`) replaced by
/// `"Unknown"`.
fn labels(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = require_column(df, column)?;
    let missing = missing_mask(series)?;
    let text = series.cast(&DataType::String)?;
    Ok(text
        .str()?
        .into_iter()
        .zip(missing)
        .map(|(v, missing)| match v {
            Some(label) if !missing => label.to_owned(),
            _ => UNKNOWN_LABEL.to_owned(),
        })
        .collect())
}
