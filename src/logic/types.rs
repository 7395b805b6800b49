use crate::error::PrepError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// `(rows, columns)`
pub type Shape = (usize, usize);

/// Multiplier applied to the IQR when deriving outlier bounds.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Label substituted for missing categorical values before encoding.
pub const UNKNOWN_LABEL: &str = "Unknown";

// DATA STRUCTURES

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum NullStrategy {
    /// Remove every row containing a missing value.
    #[default]
    Drop,
    /// Replace missing numeric values with the column mean.
    FillMean,
    /// Replace missing numeric values with the column median.
    FillMedian,
}

impl NullStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::FillMean => "fill_mean",
            Self::FillMedian => "fill_median",
        }
    }
}

impl FromStr for NullStrategy {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(Self::Drop),
            "fill_mean" => Ok(Self::FillMean),
            "fill_median" => Ok(Self::FillMedian),
            other => Err(PrepError::InvalidStrategy(other.to_owned())),
        }
    }
}

impl TryFrom<String> for NullStrategy {
    type Error = PrepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for NullStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IQR outlier bounds for one numeric column at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outlier_count: usize,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }
}

/// Structural and domain-quality snapshot of a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub shape: Shape,
    pub columns: Vec<String>,
    pub dtypes: BTreeMap<String, String>,
    pub missing_values: BTreeMap<String, usize>,
    pub duplicate_rows: usize,
    pub memory_usage_mb: f64,
    pub negative_yield_count: usize,
    pub zero_area_count: usize,
    pub zero_production_count: usize,
}

impl ValidationSummary {
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }
}
