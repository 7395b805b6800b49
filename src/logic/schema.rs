//! Fixed schema views and the projection onto them.

use super::column::require_column;
use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Logical type a schema column is mapped to after filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Text,
    Numeric,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Text => "Text",
            Self::Numeric => "Numeric",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Supported crop views. New crops become new variants with their own column set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropSchema {
    #[default]
    Rice,
}

impl CropSchema {
    pub const YEAR: &'static str = "Year";
    pub const STATE_NAME: &'static str = "State Name";
    pub const DIST_NAME: &'static str = "Dist Name";
    pub const AREA: &'static str = "RICE AREA (1000 ha)";
    pub const PRODUCTION: &'static str = "RICE PRODUCTION (1000 tons)";
    pub const YIELD: &'static str = "RICE YIELD (Kg per ha)";

    const RICE_COLUMNS: [SchemaColumn; 6] = [
        SchemaColumn {
            name: Self::YEAR,
            kind: ColumnKind::Integer,
        },
        SchemaColumn {
            name: Self::STATE_NAME,
            kind: ColumnKind::Text,
        },
        SchemaColumn {
            name: Self::DIST_NAME,
            kind: ColumnKind::Text,
        },
        SchemaColumn {
            name: Self::AREA,
            kind: ColumnKind::Numeric,
        },
        SchemaColumn {
            name: Self::PRODUCTION,
            kind: ColumnKind::Numeric,
        },
        SchemaColumn {
            name: Self::YIELD,
            kind: ColumnKind::Numeric,
        },
    ];

    /// Required columns in canonical output order.
    pub fn columns(&self) -> &'static [SchemaColumn] {
        match self {
            Self::Rice => &Self::RICE_COLUMNS,
        }
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.name).collect()
    }

    pub fn yield_column(&self) -> &'static str {
        match self {
            Self::Rice => Self::YIELD,
        }
    }

    pub fn area_column(&self) -> &'static str {
        match self {
            Self::Rice => Self::AREA,
        }
    }

    pub fn production_column(&self) -> &'static str {
        match self {
            Self::Rice => Self::PRODUCTION,
        }
    }
}

/// Projects `df` onto the schema's columns in canonical order.
///
/// Numeric columns are normalised to `Int64`/`Float64` according to their
/// [`ColumnKind`]. Columns whose dtype does not match are passed through as
/// read, and later numeric stages reject them.
///
/// # Errors
///
/// [`PrepError::MissingColumns`] naming every absent column.
pub fn filter_schema(df: &DataFrame, schema: CropSchema) -> Result<DataFrame> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = schema
        .columns()
        .iter()
        .filter(|c| !present.iter().any(|p| p == c.name))
        .map(|c| c.name.to_owned())
        .collect();

    if !missing.is_empty() {
        return Err(PrepError::MissingColumns(missing));
    }

    let mut columns = Vec::with_capacity(schema.columns().len());
    for spec in schema.columns() {
        let series = require_column(df, spec.name)?;
        let target = match spec.kind {
            ColumnKind::Integer if series.dtype().is_primitive_numeric() => Some(DataType::Int64),
            ColumnKind::Numeric if series.dtype().is_primitive_numeric() => Some(DataType::Float64),
            _ => None,
        };
        let series = match target {
            Some(dtype) if series.dtype() != &dtype => series.strict_cast(&dtype)?,
            _ => series.clone(),
        };
        columns.push(Column::from(series));
    }

    Ok(DataFrame::new(columns)?)
}
