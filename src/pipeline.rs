//! End-to-end cleaning run for one input file.
//!
//! # Example
//!
//! ```no_run
//! use cropprep::config::PipelineConfig;
//! use cropprep::pipeline::run_pipeline;
//!
//! let summary = run_pipeline(&PipelineConfig::default(), "rice.csv", "rice_clean.csv")?;
//! println!("Removed {} rows", summary.rows_removed);
//! # Ok::<(), cropprep::error::PrepError>(())
//! ```

pub mod executor;

pub use executor::{PipelineSummary, run_pipeline};
