//! Argument validation shared by the tests.
//!
//! Each check returns the validated value (or `()`) and raises
//! [`StatError`] naming the offending value otherwise.

use exactstat_error::{Result, StatError};

/// Largest significance level accepted by [`check_significance_level`].
pub const MAX_SIGNIFICANCE_LEVEL: f64 = 0.5;

/// `alpha` must lie in `(0, 0.5]`.
pub fn check_significance_level(alpha: f64) -> Result<f64> {
    if alpha > 0.0 && alpha <= MAX_SIGNIFICANCE_LEVEL {
        Ok(alpha)
    } else {
        Err(StatError::invalid_argument(
            "significance level",
            format!("{alpha} not in (0, {MAX_SIGNIFICANCE_LEVEL}]"),
        ))
    }
}

/// `value` must not be NaN or infinite.
pub fn check_finite(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatError::invalid_argument(what, value))
    }
}

/// `value` must be a number `>= 0` (NaN is rejected).
pub fn check_non_negative(what: &str, value: f64) -> Result<f64> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(StatError::invalid_argument(what, value))
    }
}

/// `p` must lie in `[0, 1]`.
pub fn check_probability(p: f64) -> Result<f64> {
    let p = check_non_negative("probability", p)
        .map_err(|_| StatError::out_of_range("probability", p, 0, 1))?;
    if p > 1.0 {
        return Err(StatError::out_of_range("probability", p, 0, 1));
    }
    Ok(p)
}

/// Two sequences must have the same length.
pub fn check_same_size<T, U>(left: &[T], right: &[U]) -> Result<()> {
    if left.len() == right.len() {
        Ok(())
    } else {
        Err(StatError::invalid_argument(
            "dimension",
            format!("{} != {}", left.len(), right.len()),
        ))
    }
}

/// Every row must have as many columns as the first; returns the column count.
///
/// An empty matrix is rejected.
pub fn check_rectangular<T, R: AsRef<[T]>>(rows: &[R]) -> Result<usize> {
    let Some(first) = rows.first() else {
        return Err(StatError::invalid_argument("table", "no rows"));
    };
    let first = first.as_ref();
    for row in rows.iter().skip(1) {
        check_same_size(first, row.as_ref())?;
    }
    Ok(first.len())
}

/// The matrix must be exactly 2 rows by 2 columns.
pub fn check_two_by_two<T, R: AsRef<[T]>>(rows: &[R]) -> Result<()> {
    let columns = check_rectangular(rows)?;
    if rows.len() == 2 && columns == 2 {
        Ok(())
    } else {
        Err(StatError::invalid_argument(
            "table shape",
            format!("{}x{} (expected 2x2)", rows.len(), columns),
        ))
    }
}

/// Grand total of a rectangular count matrix.
///
/// Every row sum, column sum and the grand total must fit in `u32`;
/// [`StatError::Overflow`] otherwise.
pub fn checked_table_sum<R: AsRef<[u32]>>(rows: &[R]) -> Result<u32> {
    let columns = check_rectangular(rows)?;
    let mut column_sums = vec![0_u32; columns];
    let mut total = 0_u32;
    for (r, row) in rows.iter().enumerate() {
        let mut row_sum = 0_u32;
        for (c, &count) in row.as_ref().iter().enumerate() {
            row_sum = row_sum.checked_add(count).ok_or_else(|| {
                StatError::overflow(format!("sum of row {r}: {row_sum} + {count}"))
            })?;
            let column_sum = column_sums[c];
            column_sums[c] = column_sum.checked_add(count).ok_or_else(|| {
                StatError::overflow(format!("sum of column {c}: {column_sum} + {count}"))
            })?;
        }
        total = total.checked_add(row_sum).ok_or_else(|| {
            StatError::overflow(format!("table total: {total} + {row_sum}"))
        })?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    use exactstat_error::ErrorKind;

    #[test]
    fn significance_level_bounds() {
        assert_eq!(check_significance_level(0.05).unwrap(), 0.05);
        assert_eq!(check_significance_level(0.5).unwrap(), 0.5);
        for alpha in [0.0, -0.1, 0.5000001, 1.0, f64::NAN] {
            let err = check_significance_level(alpha).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "alpha={alpha}");
        }
    }

    #[test]
    fn probability_bounds() {
        assert_eq!(check_probability(0.0).unwrap(), 0.0);
        assert_eq!(check_probability(1.0).unwrap(), 1.0);
        for p in [-0.0001, 1.0001, f64::NAN, f64::NEG_INFINITY] {
            let err = check_probability(p).unwrap_err();
            assert!(matches!(err, StatError::OutOfRange { .. }), "p={p}");
        }
    }

    #[test]
    fn finite_and_non_negative() {
        assert!(check_finite("x", 1.5).is_ok());
        assert!(check_finite("x", f64::INFINITY).is_err());
        assert!(check_finite("x", f64::NAN).is_err());
        assert!(check_non_negative("x", 0.0).is_ok());
        assert!(check_non_negative("x", f64::INFINITY).is_ok());
        assert!(check_non_negative("x", -1e-300).is_err());
        let err = check_non_negative("weight", f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "invalid weight: NaN");
    }

    #[test]
    fn shape_checks() {
        assert!(check_same_size(&[1, 2], &[3.0, 4.0]).is_ok());
        assert!(check_same_size(&[1, 2], &[3]).is_err());

        let ragged: Vec<Vec<u32>> = vec![vec![1, 2], vec![3]];
        assert!(check_rectangular(&ragged).is_err());
        let empty: Vec<Vec<u32>> = Vec::new();
        assert!(check_rectangular(&empty).is_err());
        assert_eq!(check_rectangular(&[[1_u32, 2, 3], [4, 5, 6]]).unwrap(), 3);

        assert!(check_two_by_two(&[[1_u32, 2], [3, 4]]).is_ok());
        let err = check_two_by_two(&[[1_u32, 2, 3], [4, 5, 6]]).unwrap_err();
        assert!(err.to_string().contains("2x3"), "{err}");
        assert!(check_two_by_two(&[[1_u32, 2]]).is_err());
    }

    #[test]
    fn table_sum_detects_overflow() {
        assert_eq!(checked_table_sum(&[[1_u32, 2], [3, 4]]).unwrap(), 10);

        let row_overflow = checked_table_sum(&[[u32::MAX, 1], [0, 0]]).unwrap_err();
        assert_eq!(row_overflow.kind(), ErrorKind::Overflow);
        assert!(
            row_overflow.to_string().contains("row 0: 4294967295 + 1"),
            "{row_overflow}"
        );

        let column_overflow = checked_table_sum(&[[u32::MAX, 0], [1, 0]]).unwrap_err();
        assert!(
            column_overflow.to_string().contains("column 0: 4294967295 + 1"),
            "{column_overflow}"
        );

        let total_overflow =
            checked_table_sum(&[[u32::MAX / 2, 0], [0, u32::MAX / 2 + 2]]).unwrap_err();
        assert!(
            total_overflow.to_string().contains("total: 2147483647 + 2147483649"),
            "{total_overflow}"
        );
    }
}
