//! # cropprep - crop record cleaning for yield prediction
//!
//! cropprep turns raw district-level crop records into a numeric table ready
//! for model training. It enforces the fixed column set of one crop view,
//! repairs missing values, removes IQR outliers, label-encodes categoricals,
//! standardizes features, splits train/test partitions and reports data
//! quality before and after cleaning.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cropprep::config::PipelineConfig;
//! use cropprep::pipeline::run_pipeline;
//!
//! let summary = run_pipeline(&PipelineConfig::default(), "rice.csv", "rice_clean.csv")?;
//! println!(
//!     "{} rows in, {} rows out",
//!     summary.original_shape.0, summary.final_shape.0
//! );
//! # Ok::<(), cropprep::error::PrepError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`logic`]: the individual transformations, each returning a new table
//! - [`pipeline`]: the fixed cleaning sequence over one file
//! - [`config`]: run settings with named defaults
//! - [`error`]: the error taxonomy shared by every stage
//! - [`logging`]: subscriber setup for the binary
//!
//! ## Immutable Stages
//!
//! No stage modifies the table it is given. Callers may keep every
//! intermediate table for auditing:
//!
//! ```no_run
//! use cropprep::logic::{CropSchema, NullStrategy, filter_schema, handle_nulls, load_table};
//! use std::path::Path;
//!
//! let raw = load_table(Path::new("rice.csv"))?;
//! let filtered = filter_schema(&raw, CropSchema::Rice)?;
//! let filled = handle_nulls(&filtered, NullStrategy::FillMedian)?;
//! assert_eq!(filtered.height(), filled.height());
//! # Ok::<(), cropprep::error::PrepError>(())
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;
pub mod logic;
pub mod pipeline;
