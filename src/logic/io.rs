use crate::error::{PrepError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEPARATOR: u8 = b',';

/// Rows sampled when inferring column dtypes.
const INFER_SCHEMA_ROWS: usize = 10_000;

pub fn load_table(path: &Path) -> Result<DataFrame> {
    load_table_with_separator(path, DEFAULT_SEPARATOR)
}

/// Reads a delimited file with a header row.
///
/// # Errors
///
/// [`PrepError::NotFound`] when `path` does not exist, [`PrepError::EmptyContent`]
/// when it holds no rows or no columns.
pub fn load_table_with_separator(path: &Path, separator: u8) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PrepError::NotFound(path.to_path_buf()));
    }
    if std::fs::metadata(path)?.len() == 0 {
        return Err(PrepError::EmptyContent(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_separator(separator)
        .finish()
        .and_then(LazyFrame::collect)
        .map_err(|e| match e {
            PolarsError::NoData(_) => PrepError::EmptyContent(path.to_path_buf()),
            other => PrepError::DataProcessing(other),
        })?;

    if df.height() == 0 || df.width() == 0 {
        return Err(PrepError::EmptyContent(path.to_path_buf()));
    }

    tracing::debug!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

pub fn save_table(df: &DataFrame, path: &Path) -> Result<()> {
    save_table_with_separator(df, path, DEFAULT_SEPARATOR)
}

/// Writes `df` as CSV with a header.
///
/// Output goes to a sibling temporary file that is renamed into place, so a
/// failed write never leaves a partial file at `path`.
///
/// # Errors
///
/// I/O failures creating or renaming the file, or a Polars serialization error.
pub fn save_table_with_separator(df: &DataFrame, path: &Path, separator: u8) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_sibling(path);
    let written = write_csv(df, &tmp_path, separator);
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    std::fs::rename(&tmp_path, path)?;

    tracing::debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

fn write_csv(df: &DataFrame, path: &Path, separator: u8) -> Result<()> {
    let mut df = df.clone();
    let file = std::fs::File::create(path)?;
    CsvWriter::new(file)
        .include_header(true)
        .with_separator(separator)
        .finish(&mut df)?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
