//! Table transformations: schema projection, missing values, outliers,
//! encoding, scaling, splitting and quality reporting.
//!
//! Every function takes the table by reference and returns a new one.

pub mod column;
pub mod encoding;
pub mod io;
pub mod naming;
pub mod nulls;
pub mod outliers;
pub mod prepare;
pub mod scaling;
pub mod schema;
pub mod split;
pub mod types;
pub mod validation;

pub use encoding::{EncodingMap, encode_column};
pub use io::{load_table, load_table_with_separator, save_table, save_table_with_separator};
pub use nulls::{handle_nulls, handle_nulls_named, missing_counts};
pub use outliers::{
    detect_outliers, detect_outliers_with, outlier_mask, remove_outliers, remove_outliers_with,
};
pub use prepare::{PreparedSplit, prepare_features, write_prepared};
pub use scaling::{ColumnScale, ScalerState, fit_transform};
pub use schema::{ColumnKind, CropSchema, SchemaColumn, filter_schema};
pub use split::{SplitOptions, TrainTestSplit, split};
pub use types::{Bounds, NullStrategy, Shape, ValidationSummary};
pub use validation::{count_duplicate_rows, validate, validate_for};
