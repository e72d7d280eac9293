//! Binary searches over monotone runs of a probability mass function.
//!
//! A unimodal pmf is non-decreasing up to its lower mode and non-increasing
//! after its upper mode. The two-sided exact tests need the edge of the run of
//! outcomes that are no more likely than the observed one on the far side of
//! the mode; these searches find that edge in O(log n) pmf evaluations.

/// Largest `i` in `[lo, hi]` with `f(i) <= target`, assuming `f` is
/// non-decreasing on `[lo, hi]`.
///
/// Returns `lo - 1` when every value exceeds `target` (including an empty
/// range).
pub fn search_ascending(lo: i64, hi: i64, target: f64, f: impl Fn(i64) -> f64) -> i64 {
    let mut left = lo;
    let mut right = hi;
    let mut found = lo - 1;
    while left <= right {
        let mid = left + (right - left) / 2;
        if f(mid) <= target {
            found = mid;
            left = mid + 1;
        } else {
            right = mid - 1;
        }
    }
    found
}

/// Smallest `j` in `[lo, hi]` with `f(j) <= target`, assuming `f` is
/// non-increasing on `[lo, hi]`.
///
/// Returns `hi + 1` when every value exceeds `target` (including an empty
/// range).
pub fn search_descending(lo: i64, hi: i64, target: f64, f: impl Fn(i64) -> f64) -> i64 {
    let mut left = lo;
    let mut right = hi;
    let mut found = hi + 1;
    while left <= right {
        let mid = left + (right - left) / 2;
        if f(mid) <= target {
            found = mid;
            right = mid - 1;
        } else {
            left = mid + 1;
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    fn linear_scan_ascending(lo: i64, hi: i64, target: f64, f: impl Fn(i64) -> f64) -> i64 {
        (lo..=hi).rev().find(|&i| f(i) <= target).unwrap_or(lo - 1)
    }

    fn linear_scan_descending(lo: i64, hi: i64, target: f64, f: impl Fn(i64) -> f64) -> i64 {
        (lo..=hi).find(|&j| f(j) <= target).unwrap_or(hi + 1)
    }

    #[test]
    fn ascending_finds_last_value_at_or_below_target() {
        let values = [0.1, 0.2, 0.2, 0.4, 0.8];
        let f = |i: i64| values[i as usize];
        assert_eq!(search_ascending(0, 4, 0.2, f), 2);
        assert_eq!(search_ascending(0, 4, 0.05, f), -1);
        assert_eq!(search_ascending(0, 4, 1.0, f), 4);
        assert_eq!(search_ascending(0, 4, 0.3, f), 2);
    }

    #[test]
    fn descending_finds_first_value_at_or_below_target() {
        let values = [0.8, 0.4, 0.2, 0.2, 0.1];
        let f = |i: i64| values[i as usize];
        assert_eq!(search_descending(0, 4, 0.2, f), 2);
        assert_eq!(search_descending(0, 4, 0.05, f), 5);
        assert_eq!(search_descending(0, 4, 1.0, f), 0);
    }

    #[test]
    fn empty_ranges_return_sentinels() {
        assert_eq!(search_ascending(3, 2, 1.0, |_| 0.0), 2);
        assert_eq!(search_descending(3, 2, 1.0, |_| 0.0), 3);
    }

    #[test]
    fn searches_agree_with_linear_scan() {
        let rising: Vec<f64> = (0..40).map(|i| f64::from(i).powi(2)).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        for target in [-1.0, 0.0, 3.0, 100.0, 400.0, 1520.9, 2000.0] {
            let up = |i: i64| rising[i as usize];
            let down = |i: i64| falling[i as usize];
            assert_eq!(
                search_ascending(0, 39, target, up),
                linear_scan_ascending(0, 39, target, up),
                "target={target}"
            );
            assert_eq!(
                search_descending(0, 39, target, down),
                linear_scan_descending(0, 39, target, down),
                "target={target}"
            );
        }
    }

    #[test]
    fn evaluation_count_is_logarithmic() {
        let calls = Cell::new(0_u32);
        let f = |i: i64| {
            calls.set(calls.get() + 1);
            i as f64
        };
        let found = search_ascending(0, 1_000_000, 12_345.5, f);
        assert_eq!(found, 12_345);
        assert!(calls.get() <= 21, "calls={}", calls.get());
    }
}
