use super::f64_values;
use crate::error::PrepError;
use crate::logic::*;
use anyhow::Result;
use polars::prelude::*;

fn five_rows() -> PolarsResult<(DataFrame, Series)> {
    let x = df!("id" => &[0.0, 1.0, 2.0, 3.0, 4.0], "area" => &[5.0, 6.0, 7.0, 8.0, 9.0])?;
    let y = Series::new("yield".into(), &[100.0, 101.0, 102.0, 103.0, 104.0]);
    Ok((x, y))
}

fn options(test_size: f64, random_state: Option<u64>) -> SplitOptions {
    SplitOptions {
        test_size,
        random_state,
    }
}

#[test]
fn test_partition_sizes() -> Result<()> {
    let (x, y) = five_rows()?;
    let parts = split(&x, &y, &options(0.4, Some(1)))?;
    assert_eq!(parts.x_train.height(), 3);
    assert_eq!(parts.x_test.height(), 2);
    assert_eq!(parts.y_train.len(), 3);
    assert_eq!(parts.y_test.len(), 2);
    assert_eq!(parts.x_train.width(), 2);
    Ok(())
}

#[test]
fn test_invalid_test_sizes() {
    let (x, y) = five_rows().unwrap();
    for size in [1.5, 0.0, 1.0, -0.2, f64::NAN] {
        let result = split(&x, &y, &options(size, None));
        assert!(
            matches!(result, Err(PrepError::InvalidTestSize(_))),
            "test_size {size} should be rejected"
        );
    }
}

#[test]
fn test_split_leaving_empty_partition_is_rejected() {
    let x = df!("a" => &[1.0]).unwrap();
    let y = Series::new("y".into(), &[1.0]);
    assert!(matches!(
        split(&x, &y, &SplitOptions::default()),
        Err(PrepError::InvalidTestSize(_))
    ));
}

#[test]
fn test_length_mismatch_and_empty_input() {
    let (x, _) = five_rows().unwrap();
    let short = Series::new("y".into(), &[1.0, 2.0]);
    assert!(matches!(
        split(&x, &short, &SplitOptions::default()),
        Err(PrepError::LengthMismatch {
            features: 5,
            target: 2
        })
    ));

    let empty_x = df!("a" => Vec::<f64>::new()).unwrap();
    let empty_y = Series::new("y".into(), Vec::<f64>::new());
    assert!(matches!(
        split(&empty_x, &empty_y, &SplitOptions::default()),
        Err(PrepError::EmptyInput(_))
    ));
}

#[test]
fn test_same_seed_same_partition() -> Result<()> {
    let (x, y) = five_rows()?;
    let a = split(&x, &y, &options(0.4, Some(42)))?;
    let b = split(&x, &y, &options(0.4, Some(42)))?;
    assert!(a.x_train.equals(&b.x_train), "train partitions differ");
    assert!(a.x_test.equals(&b.x_test), "test partitions differ");
    assert!(a.y_test.equals(&b.y_test), "targets differ");
    Ok(())
}

#[test]
fn test_rows_stay_aligned_and_cover_input() -> Result<()> {
    let (x, y) = five_rows()?;
    let parts = split(&x, &y, &options(0.4, Some(7)))?;

    let mut ids = Vec::new();
    for (xs, ys) in [(&parts.x_train, &parts.y_train), (&parts.x_test, &parts.y_test)] {
        let x_ids = f64_values(xs, "id")?;
        let y_vals: Vec<Option<f64>> = ys.f64()?.into_iter().collect();
        for (id, target) in x_ids.iter().zip(&y_vals) {
            assert_eq!(id.unwrap() + 100.0, target.unwrap(), "row pairs stay aligned");
        }
        ids.extend(x_ids.into_iter().flatten());
    }
    ids.sort_by(f64::total_cmp);
    assert_eq!(ids, vec![0.0, 1.0, 2.0, 3.0, 4.0]);

    // Original table is untouched
    assert_eq!(f64_values(&x, "id")?, vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
    Ok(())
}
