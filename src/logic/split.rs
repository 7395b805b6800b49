use crate::error::{PrepError, Result};
use polars::prelude::*;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEST_SIZE: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Fraction of rows assigned to the test partition, strictly inside (0, 1).
    pub test_size: f64,
    /// Shuffle seed; the same seed always yields the same partition.
    pub random_state: Option<u64>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            random_state: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrainTestSplit {
    pub x_train: DataFrame,
    pub x_test: DataFrame,
    pub y_train: Series,
    pub y_test: Series,
}

/// Shuffles rows and partitions features and target into train and test sets.
///
/// `round(test_size * n)` rows go to the test partition. X and y are permuted
/// with the same indices, so row pairs stay aligned.
///
/// # Errors
///
/// [`PrepError::InvalidTestSize`] when `test_size` is not strictly between 0
/// and 1 or would leave a partition empty, [`PrepError::EmptyInput`] when
/// either input is empty, [`PrepError::LengthMismatch`] when row counts differ.
pub fn split(x: &DataFrame, y: &Series, options: &SplitOptions) -> Result<TrainTestSplit> {
    let test_size = options.test_size;
    if !(test_size.is_finite() && test_size > 0.0 && test_size < 1.0) {
        return Err(PrepError::InvalidTestSize(test_size));
    }
    if x.height() == 0 || x.width() == 0 || y.is_empty() {
        return Err(PrepError::EmptyInput(
            "features and target must both contain rows".to_owned(),
        ));
    }
    if x.height() != y.len() {
        return Err(PrepError::LengthMismatch {
            features: x.height(),
            target: y.len(),
        });
    }

    let n = x.height();
    let test_rows = (test_size * n as f64).round() as usize;
    if test_rows == 0 || test_rows >= n {
        return Err(PrepError::InvalidTestSize(test_size));
    }

    let mut indices: Vec<IdxSize> = (0..n as IdxSize).collect();
    let mut rng = match options.random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(test_rows);
    let test_idx = IdxCa::from_slice("idx".into(), test_idx);
    let train_idx = IdxCa::from_slice("idx".into(), train_idx);

    let split = TrainTestSplit {
        x_train: x.take(&train_idx)?,
        x_test: x.take(&test_idx)?,
        y_train: y.take(&train_idx)?,
        y_test: y.take(&test_idx)?,
    };

    tracing::debug!(
        "Split {n} rows into {} train / {} test",
        split.x_train.height(),
        split.x_test.height()
    );
    Ok(split)
}
