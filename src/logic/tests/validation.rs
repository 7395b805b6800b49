use super::rice_frame;
use crate::logic::*;
use anyhow::Result;
use polars::prelude::*;

#[test]
fn test_domain_counts_and_duplicates() -> Result<()> {
    let df = df!(
        CropSchema::YEAR => &[2000i64, 2001, 2002, 2003, 2003],
        CropSchema::STATE_NAME => &["Bihar", "Bihar", "Kerala", "Punjab", "Punjab"],
        CropSchema::DIST_NAME => &["Patna", "Gaya", "Kochi", "Amritsar", "Amritsar"],
        CropSchema::AREA => &[10.0, 0.0, 12.0, 13.0, 13.0],
        CropSchema::PRODUCTION => &[20.0, 21.0, 0.0, 26.0, 26.0],
        CropSchema::YIELD => &[-5.0, 2100.0, 2200.0, 2000.0, 2000.0]
    )?;
    let report = validate(&df)?;

    assert_eq!(report.negative_yield_count, 1);
    assert_eq!(report.zero_area_count, 1);
    assert_eq!(report.zero_production_count, 1);
    assert_eq!(report.duplicate_rows, 1);
    assert_eq!(report.shape, (5, 6));
    Ok(())
}

#[test]
fn test_one_row_can_count_in_several_domain_checks() -> Result<()> {
    let df = df!(
        CropSchema::AREA => &[0.0],
        CropSchema::PRODUCTION => &[0.0],
        CropSchema::YIELD => &[-1.0]
    )?;
    let report = validate(&df)?;
    assert_eq!(report.negative_yield_count, 1);
    assert_eq!(report.zero_area_count, 1);
    assert_eq!(report.zero_production_count, 1);
    Ok(())
}

#[test]
fn test_structure_and_missing_counts() -> Result<()> {
    let df = df!(
        "a" => &[Some(1.0), None, Some(3.0)],
        "b" => &[None::<&str>, None, Some("x")]
    )?;
    let report = validate(&df)?;

    assert_eq!(report.columns, vec!["a".to_owned(), "b".to_owned()]);
    assert_eq!(report.missing_values["a"], 1);
    assert_eq!(report.missing_values["b"], 2);
    assert_eq!(report.total_missing(), 3);
    assert_eq!(report.dtypes["a"], DataType::Float64.to_string());
    assert_eq!(report.dtypes["b"], DataType::String.to_string());
    assert!(report.memory_usage_mb > 0.0);
    assert_eq!(report.duplicate_rows, 0);
    // Domain columns are absent
    assert_eq!(report.negative_yield_count, 0);
    assert_eq!(report.zero_area_count, 0);
    Ok(())
}

#[test]
fn test_missing_cells_participate_in_duplicate_detection() -> Result<()> {
    let df = df!(
        "a" => &[None, None, Some(1.0)],
        "b" => &[Some("x"), Some("x"), Some("x")]
    )?;
    assert_eq!(count_duplicate_rows(&df)?, 1);

    let text_null = df!("s" => &[None, Some("null")])?;
    assert_eq!(count_duplicate_rows(&text_null)?, 0, "missing differs from any text");
    Ok(())
}

#[test]
fn test_validation_is_pure() -> Result<()> {
    let df = rice_frame(&[2000.0, 2100.0, 2100.0])?;
    let first = validate(&df)?;
    let second = validate(&df)?;
    assert_eq!(first, second);
    assert_eq!(df.height(), 3);
    Ok(())
}
