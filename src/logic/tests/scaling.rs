use super::f64_values;
use crate::error::PrepError;
use crate::logic::*;
use anyhow::Result;
use polars::prelude::*;

fn mean_and_std(values: &[Option<f64>]) -> (f64, f64) {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    let n = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / n;
    let var = observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[test]
fn test_train_columns_have_zero_mean_unit_std() -> Result<()> {
    let train = df!(
        "area" => &[10.0, 20.0, 30.0, 45.0, 95.0],
        "year" => &[1990i64, 1995, 2000, 2005, 2010]
    )?;
    let (scaled, test, state) = fit_transform(&train, None)?;

    assert!(test.is_none());
    assert_eq!(scaled.shape(), train.shape());
    assert_eq!(state.columns.len(), 2);
    for column in ["area", "year"] {
        let (mean, std) = mean_and_std(&f64_values(&scaled, column)?);
        assert!(mean.abs() < 1e-9, "{column} mean {mean}");
        assert!((std - 1.0).abs() < 1e-9, "{column} std {std}");
    }
    Ok(())
}

#[test]
fn test_test_partition_uses_training_statistics() -> Result<()> {
    let train = df!("v" => &[2.0, 4.0, 6.0, 8.0])?;
    let test = df!("v" => &[5.0, 100.0])?;
    let (_, scaled_test, state) = fit_transform(&train, Some(&test))?;

    let scale = &state.columns[0];
    assert_eq!(scale.mean, 5.0);
    assert!((scale.std - 5.0f64.sqrt()).abs() < 1e-12);

    let values = f64_values(&scaled_test.unwrap(), "v")?;
    assert_eq!(values[0], Some(0.0));
    let expected = 95.0 / 5.0f64.sqrt();
    assert!((values[1].unwrap() - expected).abs() < 1e-9);

    // Refitting on the test data would give different statistics
    let refit = ScalerState::fit(&test)?;
    assert_ne!(refit, state);
    Ok(())
}

#[test]
fn test_zero_variance_column_is_centred_to_zero() -> Result<()> {
    let train = df!("c" => &[7.0, 7.0, 7.0], "v" => &[1.0, 2.0, 3.0])?;
    let (scaled, _, state) = fit_transform(&train, None)?;
    assert_eq!(state.columns[0].std, 0.0);
    assert_eq!(
        f64_values(&scaled, "c")?,
        vec![Some(0.0), Some(0.0), Some(0.0)]
    );
    assert!(
        f64_values(&scaled, "c")?.iter().flatten().all(|v| v.is_finite()),
        "no NaN or infinity"
    );
    Ok(())
}

#[test]
fn test_missing_values_stay_missing() -> Result<()> {
    let train = df!("v" => &[Some(1.0), None, Some(3.0)])?;
    let (scaled, _, _) = fit_transform(&train, None)?;
    assert_eq!(f64_values(&scaled, "v")?, vec![Some(-1.0), None, Some(1.0)]);
    Ok(())
}

#[test]
fn test_constant_fractional_column_counts_as_zero_variance() -> Result<()> {
    let train = df!("c" => &[0.1, 0.1, 0.1], "d" => &[0.7, 0.7, 0.7])?;
    let (scaled, _, state) = fit_transform(&train, None)?;

    for scale in &state.columns {
        assert_eq!(scale.std, 0.0, "rounding noise in '{}'", scale.column);
    }
    for column in ["c", "d"] {
        for v in f64_values(&scaled, column)?.into_iter().flatten() {
            assert!(v.abs() < 1e-12, "{column} should be centred to zero, got {v}");
        }
    }
    Ok(())
}

#[test]
fn test_nan_is_ignored_when_fitting() -> Result<()> {
    let train = df!("v" => &[1.0, 2.0, f64::NAN, 3.0])?;
    let (scaled, _, state) = fit_transform(&train, None)?;

    assert!((state.columns[0].mean - 2.0).abs() < 1e-12, "mean of observed values");
    assert!(
        (state.columns[0].std - (2.0f64 / 3.0).sqrt()).abs() < 1e-12,
        "population std of observed values"
    );
    let values = f64_values(&scaled, "v")?;
    assert!(values[2].is_some_and(f64::is_nan), "NaN stays missing");
    assert!(values[0].is_some_and(|v| v < 0.0), "observed values are scaled");
    assert_eq!(values[1], Some(0.0));
    Ok(())
}

#[test]
fn test_empty_train_is_rejected() {
    let no_rows = df!("v" => Vec::<f64>::new()).unwrap();
    assert!(matches!(fit_transform(&no_rows, None), Err(PrepError::EmptyInput(_))));

    let no_columns = DataFrame::empty();
    assert!(matches!(fit_transform(&no_columns, None), Err(PrepError::EmptyInput(_))));
}

#[test]
fn test_non_numeric_and_missing_columns() {
    let train = df!("s" => &["a", "b"]).unwrap();
    assert!(matches!(
        fit_transform(&train, None),
        Err(PrepError::NonNumericColumn { .. })
    ));

    let train = df!("v" => &[1.0, 2.0]).unwrap();
    let test = df!("w" => &[1.0]).unwrap();
    assert!(matches!(
        fit_transform(&train, Some(&test)),
        Err(PrepError::MissingColumn(ref c)) if c == "v"
    ));
}
