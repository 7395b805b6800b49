use crate::error::{PrepError, Result};
use crate::logic::split::SplitOptions;
use crate::logic::types::DEFAULT_IQR_MULTIPLIER;
use crate::logic::{CropSchema, NullStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENCODE_COLUMN: &str = CropSchema::STATE_NAME;
pub const DEFAULT_OUTLIER_COLUMN: &str = CropSchema::YIELD;
pub const DEFAULT_SEPARATOR: char = ',';

/// Settings for a pipeline run. Every field has a named default, so a config
/// file only needs the values it changes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub crop: CropSchema,
    pub null_strategy: NullStrategy,
    /// Categorical column to label-encode
    pub encode_column: String,
    /// Numeric column whose IQR outliers are removed
    pub outlier_column: String,
    pub iqr_multiplier: f64,
    /// CSV field separator for both input and output
    pub separator: char,
    pub split: SplitOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            crop: CropSchema::Rice,
            null_strategy: NullStrategy::Drop,
            encode_column: DEFAULT_ENCODE_COLUMN.to_owned(),
            outlier_column: DEFAULT_OUTLIER_COLUMN.to_owned(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            separator: DEFAULT_SEPARATOR,
            split: SplitOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// I/O failure reading the file, or any error of [`Self::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string.
    ///
    /// # Errors
    ///
    /// [`PrepError::InvalidStrategy`] for an unknown `null_strategy`,
    /// otherwise malformed JSON or field values.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(strategy) = value.get("null_strategy").and_then(serde_json::Value::as_str) {
            strategy.parse::<NullStrategy>()?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// # Errors
    ///
    /// Serialization failure.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Separator as the single byte the CSV reader and writer expect.
    ///
    /// # Errors
    ///
    /// [`PrepError::InvalidSeparator`] for a non-ASCII character.
    pub fn separator_byte(&self) -> Result<u8> {
        u8::try_from(self.separator)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(PrepError::InvalidSeparator(self.separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.null_strategy, NullStrategy::Drop);
        assert_eq!(config.encode_column, "State Name");
        assert_eq!(config.outlier_column, "RICE YIELD (Kg per ha)");
        assert!((config.split.test_size - 0.2).abs() < f64::EPSILON, "default test size");
        assert_eq!(config.split.random_state, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> anyhow::Result<()> {
        let config = PipelineConfig::from_json(
            r#"{ "null_strategy": "fill_median", "split": { "random_state": 7 } }"#,
        )?;
        assert_eq!(config.null_strategy, NullStrategy::FillMedian);
        assert_eq!(config.split.random_state, Some(7));
        assert!((config.split.test_size - 0.2).abs() < f64::EPSILON, "test size defaulted");
        assert_eq!(config.crop, CropSchema::Rice);
        Ok(())
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = PipelineConfig::from_json(r#"{ "null_strategy": "interpolate" }"#);
        assert!(
            matches!(result, Err(PrepError::InvalidStrategy(ref s)) if s == "interpolate"),
            "unknown strategy must fail as an invalid strategy"
        );
    }

    #[test]
    fn test_strategy_deserializes_through_from_str() {
        let parsed: NullStrategy = serde_json::from_str(r#""fill_mean""#).unwrap();
        assert_eq!(parsed, NullStrategy::FillMean);

        let err = serde_json::from_str::<NullStrategy>(r#""mode""#).unwrap_err();
        assert!(
            err.to_string().contains("Invalid missing-value strategy 'mode'"),
            "serde surfaces the strategy error: {err}"
        );
    }

    #[test]
    fn test_non_string_strategy_is_a_config_error() {
        let result = PipelineConfig::from_json(r#"{ "null_strategy": 3 }"#);
        assert!(matches!(result, Err(PrepError::Config(_))), "wrong JSON type");
    }

    #[test]
    fn test_separator_byte() -> anyhow::Result<()> {
        let mut config = PipelineConfig::default();
        assert_eq!(config.separator_byte()?, b',');
        config.separator = ';';
        assert_eq!(config.separator_byte()?, b';');
        config.separator = 'é';
        assert!(config.separator_byte().is_err(), "non-ASCII separator");
        Ok(())
    }

    #[test]
    fn test_json_round_trip() -> anyhow::Result<()> {
        let config = PipelineConfig {
            null_strategy: NullStrategy::FillMean,
            iqr_multiplier: 3.0,
            ..Default::default()
        };
        assert_eq!(PipelineConfig::from_json(&config.to_json()?)?, config);
        Ok(())
    }
}
