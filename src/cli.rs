use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use cropprep::config::PipelineConfig;
use cropprep::logic::{
    CropSchema, NullStrategy, SplitOptions, filter_schema, load_table_with_separator,
    prepare_features, validate_for, write_prepared,
};
use cropprep::pipeline::run_pipeline;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropprep",
    about = "Clean district crop records into a model-ready table"
)]
pub struct Cli {
    /// Default log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Also write rotating log files into this directory
    #[arg(long, global = true, env = "CROPPREP_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to a JSON pipeline configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the cleaning pipeline and write the cleaned CSV
    Run {
        /// Raw input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Destination for the cleaned CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Missing-value strategy: drop, fill_mean or fill_median
        #[arg(long)]
        strategy: Option<String>,

        /// Also write the run summary as JSON to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Print a data-quality report for the schema columns of a file
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Split a cleaned CSV into scaled train/test partitions
    Prepare {
        /// Cleaned CSV produced by `run`
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for x_train/x_test/y_train/y_test CSVs and scaler.json
        #[arg(long)]
        out_dir: PathBuf,

        /// Target column
        #[arg(long, default_value = CropSchema::YIELD)]
        target: String,

        /// Fraction of rows in the test partition
        #[arg(long)]
        test_size: Option<f64>,

        /// Shuffle seed for a reproducible split
        #[arg(long)]
        seed: Option<u64>,

        /// Feature column (repeatable). Defaults to every numeric column except the target.
        #[arg(long = "feature")]
        features: Vec<String>,
    },
}

pub fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(p) => PipelineConfig::from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(PipelineConfig::default()),
    }
}

pub fn run_command(command: Commands, mut config: PipelineConfig) -> Result<()> {
    match command {
        Commands::Run {
            input,
            output,
            strategy,
            summary,
        } => {
            if let Some(s) = strategy {
                config.null_strategy = s.parse::<NullStrategy>()?;
            }
            handle_run(&config, input, output, summary)
        }
        Commands::Validate { input } => handle_validate(&config, input),
        Commands::Prepare {
            input,
            out_dir,
            target,
            test_size,
            seed,
            features,
        } => {
            let options = SplitOptions {
                test_size: test_size.unwrap_or(config.split.test_size),
                random_state: seed.or(config.split.random_state),
            };
            let features = (!features.is_empty()).then_some(features);
            handle_prepare(&config, input, out_dir, &target, features, &options)
        }
    }
}

fn handle_run(
    config: &PipelineConfig,
    input: PathBuf,
    output: PathBuf,
    summary_path: Option<PathBuf>,
) -> Result<()> {
    let summary = run_pipeline(config, &input, &output)
        .with_context(|| format!("Pipeline failed for {}", input.display()))?;

    let json = serde_json::to_string_pretty(&summary)?;
    if let Some(path) = summary_path {
        std::fs::write(&path, &json)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
    }
    println!("{json}");
    Ok(())
}

fn handle_validate(config: &PipelineConfig, input: PathBuf) -> Result<()> {
    let df = load_table_with_separator(&input, config.separator_byte()?)?;
    let df = filter_schema(&df, config.crop)?;
    let report = validate_for(&df, config.crop)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_prepare(
    config: &PipelineConfig,
    input: PathBuf,
    out_dir: PathBuf,
    target: &str,
    features: Option<Vec<String>>,
    options: &SplitOptions,
) -> Result<()> {
    let df = load_table_with_separator(&input, config.separator_byte()?)?;
    let prepared = prepare_features(&df, target, features.as_deref(), options)?;
    write_prepared(&prepared, &out_dir)
        .with_context(|| format!("Failed to write partitions to {}", out_dir.display()))?;
    println!(
        "Wrote {} train / {} test rows to {}",
        prepared.split.x_train.height(),
        prepared.split.x_test.height(),
        out_dir.display()
    );
    Ok(())
}
