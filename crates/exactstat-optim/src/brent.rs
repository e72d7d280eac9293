//! Brent's bracketed minimizer.
//!
//! Golden-section steps interleaved with inverse parabolic interpolation
//! through the three best recent points. The bracket `(a, b)` always holds the
//! incumbent `x`; iteration stops once
//! `|x - (a + b) / 2| <= 2 tol - (b - a) / 2` with
//! `tol = relative_tolerance * |x| + absolute_tolerance`.
//!
//! Objective values may be NaN. A NaN incumbent is displaced by any new point,
//! a NaN candidate never displaces a number, and the returned pair is the best
//! of every evaluation (and the caller's start point) with NaN ranked below all
//! numbers. The returned pair is therefore never worse than anything the
//! search saw, whatever the shape of the objective.

use exactstat_error::{Result, StatError};
use tracing::{debug, trace, warn};

/// Smallest accepted relative tolerance.
pub const MIN_RELATIVE_TOLERANCE: f64 = 2.0 * f64::EPSILON;
/// Smallest accepted absolute tolerance.
pub const MIN_ABSOLUTE_TOLERANCE: f64 = f64::MIN_POSITIVE;
/// Relative tolerance used by [`BrentOptimizer::default`].
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-10;
/// Absolute tolerance used by [`BrentOptimizer::default`].
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-14;
/// Hard cap on objective evaluations per call.
///
/// The tolerance test ends every well-posed search long before this; the cap
/// only bounds pathological inputs. Hitting it returns the best point so far.
pub const MAX_EVALUATIONS: u32 = 10_000;

/// `(3 - sqrt(5)) / 2`.
const GOLDEN_SECTION: f64 = 0.381_966_011_250_105_1;

/// Result of one [`BrentOptimizer::optimize`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimum {
    /// Best abscissa observed.
    pub point: f64,
    /// Objective value at [`Self::point`].
    pub value: f64,
    /// Objective evaluations made by the call (the start value is supplied by
    /// the caller and is not counted).
    pub evaluations: u32,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    point: f64,
    value: f64,
}

impl Sample {
    /// The better of two samples; NaN loses to any number and ties keep `self`.
    fn better(self, other: Self) -> Self {
        if other.value.is_nan() {
            self
        } else if self.value.is_nan() || other.value < self.value {
            other
        } else {
            self
        }
    }
}

/// `candidate` may replace `incumbent`: true when the incumbent is NaN or the
/// candidate is no larger.
fn no_worse(candidate: f64, incumbent: f64) -> bool {
    incumbent.is_nan() || candidate <= incumbent
}

/// Bounded univariate minimizer with fixed convergence tolerances.
///
/// The optimizer holds no per-call state and can be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentOptimizer {
    relative_tolerance: f64,
    absolute_tolerance: f64,
}

impl Default for BrentOptimizer {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
        }
    }
}

impl BrentOptimizer {
    /// Create an optimizer.
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidArgument`] if either tolerance is NaN or below
    /// [`MIN_RELATIVE_TOLERANCE`] / [`MIN_ABSOLUTE_TOLERANCE`].
    pub fn new(relative_tolerance: f64, absolute_tolerance: f64) -> Result<Self> {
        if relative_tolerance.is_nan() || relative_tolerance < MIN_RELATIVE_TOLERANCE {
            return Err(StatError::invalid_argument(
                "relative tolerance",
                format!("{relative_tolerance:e} (minimum {MIN_RELATIVE_TOLERANCE:e})"),
            ));
        }
        if absolute_tolerance.is_nan() || absolute_tolerance < MIN_ABSOLUTE_TOLERANCE {
            return Err(StatError::invalid_argument(
                "absolute tolerance",
                format!("{absolute_tolerance:e} (minimum {MIN_ABSOLUTE_TOLERANCE:e})"),
            ));
        }
        Ok(Self {
            relative_tolerance,
            absolute_tolerance,
        })
    }

    #[must_use]
    pub const fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    #[must_use]
    pub const fn absolute_tolerance(&self) -> f64 {
        self.absolute_tolerance
    }

    /// Minimize `f` over the bracket spanned by `lo` and `hi` (either order),
    /// starting from the interior point `start` whose value `f_start` the
    /// caller has already computed (it may be NaN).
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidArgument`] if a bound or the start is not finite,
    /// `lo == hi`, or `start` is not strictly inside the bracket.
    pub fn optimize<F>(&self, mut f: F, lo: f64, hi: f64, start: f64, f_start: f64) -> Result<Optimum>
    where
        F: FnMut(f64) -> f64,
    {
        for (what, value) in [("bracket bound", lo), ("bracket bound", hi), ("start point", start)] {
            if !value.is_finite() {
                return Err(StatError::invalid_argument(what, value));
            }
        }
        if lo == hi {
            return Err(StatError::invalid_argument(
                "bracket",
                format!("[{lo}, {hi}] is empty"),
            ));
        }
        let (mut a, mut b) = if lo < hi { (lo, hi) } else { (hi, lo) };
        if start <= a || start >= b {
            return Err(StatError::invalid_argument(
                "start point",
                format!("{start} is not strictly inside ({a}, {b})"),
            ));
        }

        let mut x = start;
        let mut v = x;
        let mut w = x;
        let mut fx = f_start;
        let mut fv = fx;
        let mut fw = fx;
        let mut d = 0.0_f64;
        let mut e = 0.0_f64;

        let mut best = Sample {
            point: x,
            value: fx,
        };
        let mut evaluations = 0_u32;

        loop {
            let mid = 0.5 * (a + b);
            let tol1 = self.relative_tolerance * x.abs() + self.absolute_tolerance;
            let tol2 = 2.0 * tol1;

            if (x - mid).abs() <= tol2 - 0.5 * (b - a) {
                debug!(
                    point = best.point,
                    value = best.value,
                    evaluations,
                    "brent search converged"
                );
                break;
            }
            if evaluations >= MAX_EVALUATIONS {
                warn!(
                    point = best.point,
                    value = best.value,
                    evaluations,
                    bracket_width = b - a,
                    "brent search hit the evaluation cap"
                );
                break;
            }

            let mut parabolic = false;
            if e.abs() > tol1 {
                let mut r = (x - w) * (fx - fv);
                let mut q = (x - v) * (fx - fw);
                let mut p = (x - v) * q - (x - w) * r;
                q = 2.0 * (q - r);
                if q > 0.0 {
                    p = -p;
                } else {
                    q = -q;
                }
                r = e;
                e = d;

                if p > q * (a - x) && p < q * (b - x) && p.abs() < (0.5 * q * r).abs() {
                    d = p / q;
                    let u = x + d;
                    // Stay at least tol2 away from the bracket ends.
                    if u - a < tol2 || b - u < tol2 {
                        d = if x <= mid { tol1 } else { -tol1 };
                    }
                    parabolic = true;
                }
            }
            if !parabolic {
                e = if x < mid { b - x } else { a - x };
                d = GOLDEN_SECTION * e;
            }

            let u = if d.abs() < tol1 {
                if d >= 0.0 { x + tol1 } else { x - tol1 }
            } else {
                x + d
            };
            let fu = f(u);
            evaluations += 1;
            trace!(u, fu, a, b, parabolic, "brent step");

            best = best.better(Sample {
                point: u,
                value: fu,
            });

            if no_worse(fu, fx) {
                if u < x {
                    b = x;
                } else {
                    a = x;
                }
                v = w;
                fv = fw;
                w = x;
                fw = fx;
                x = u;
                fx = fu;
            } else {
                if u < x {
                    a = u;
                } else {
                    b = u;
                }
                if no_worse(fu, fw) || w == x {
                    v = w;
                    fv = fw;
                    w = u;
                    fw = fu;
                } else if no_worse(fu, fv) || v == x || v == w {
                    v = u;
                    fv = fu;
                }
            }
        }

        Ok(Optimum {
            point: best.point,
            value: best.value,
            evaluations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    fn optimizer() -> BrentOptimizer {
        BrentOptimizer::new(1e-10, 1e-14).unwrap()
    }

    #[test]
    fn default_tolerances_pass_validation() {
        let default = BrentOptimizer::default();
        assert_eq!(
            BrentOptimizer::new(default.relative_tolerance(), default.absolute_tolerance()).unwrap(),
            default
        );
    }

    #[test]
    fn sine_minimum_in_bracket() {
        let result = optimizer().optimize(f64::sin, 4.0, 5.0, 4.5, 4.5_f64.sin()).unwrap();
        let expected = 1.5 * PI;
        let relative_error = ((result.point - expected) / expected).abs();
        assert!(relative_error < 5e-12, "point={} error={relative_error:e}", result.point);
        assert_eq!(result.value, -1.0);
        assert!(
            (15..=100).contains(&result.evaluations),
            "evaluations={}",
            result.evaluations
        );
    }

    #[test]
    fn swapped_bracket_gives_identical_result() {
        let forward = optimizer().optimize(f64::sin, 4.0, 5.0, 4.5, 4.5_f64.sin()).unwrap();
        let reversed = optimizer().optimize(f64::sin, 5.0, 4.0, 4.5, 4.5_f64.sin()).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn repeated_calls_are_bitwise_identical() {
        let opt = optimizer();
        let quartic = |x: f64| (x - 0.3).powi(4) + 0.1 * x;
        let first = opt.optimize(quartic, -2.0, 3.0, 1.0, quartic(1.0)).unwrap();
        let second = opt.optimize(quartic, -2.0, 3.0, 1.0, quartic(1.0)).unwrap();
        assert_eq!(first.point.to_bits(), second.point.to_bits());
        assert_eq!(first.value.to_bits(), second.value.to_bits());
        assert_eq!(first.evaluations, second.evaluations);
    }

    #[test]
    fn quadratic_is_found_by_interpolation() {
        let f = |x: f64| (x - 2.0) * (x - 2.0);
        let result = optimizer().optimize(f, 0.0, 5.0, 1.0, f(1.0)).unwrap();
        assert!((result.point - 2.0).abs() < 1e-9, "point={}", result.point);
        assert!(result.evaluations < 20, "evaluations={}", result.evaluations);
    }

    #[test]
    fn nan_start_value_is_replaced() {
        let f = |x: f64| (x - 0.25).abs();
        let result = optimizer().optimize(f, 0.0, 1.0, 0.5, f64::NAN).unwrap();
        assert!((result.point - 0.25).abs() < 1e-8, "point={}", result.point);
        assert!(result.value.is_finite());
    }

    #[test]
    fn all_nan_objective_still_terminates() {
        let result = optimizer()
            .optimize(|_| f64::NAN, -1.0, 1.0, 0.0, f64::NAN)
            .unwrap();
        assert!(result.value.is_nan());
        assert!(result.point > -1.0 && result.point < 1.0);
        assert!(result.evaluations <= MAX_EVALUATIONS);
    }

    #[test]
    fn returns_best_seen_not_last_seen() {
        // Two wells: the search converges into one but must report the best
        // sample, which may be the start point.
        let f = |x: f64| if (x - 0.9).abs() < 0.01 { -10.0 } else { (x - 0.2).powi(2) };
        let result = optimizer().optimize(f, 0.0, 1.0, 0.9, f(0.9)).unwrap();
        assert_eq!(result.value, -10.0);
        assert_eq!(result.point, 0.9);
    }

    #[test]
    fn result_is_first_minimum_among_all_evaluations() {
        let f = |x: f64| (5.0 * x).sin() + 0.1 * x;
        let mut seen = vec![(2.0, f(2.0))];
        let result = optimizer()
            .optimize(
                |x| {
                    let y = f(x);
                    seen.push((x, y));
                    y
                },
                0.0,
                4.0,
                2.0,
                f(2.0),
            )
            .unwrap();
        assert_eq!(seen.len(), result.evaluations as usize + 1);
        let (point, value) = seen
            .iter()
            .copied()
            .fold(seen[0], |acc, s| if s.1 < acc.1 { s } else { acc });
        assert_eq!(result.point, point);
        assert_eq!(result.value, value);
    }

    #[test]
    fn rejects_bad_tolerances() {
        assert!(BrentOptimizer::new(f64::NAN, 1e-14).is_err());
        assert!(BrentOptimizer::new(1e-10, f64::NAN).is_err());
        assert!(BrentOptimizer::new(f64::EPSILON, 1e-14).is_err());
        assert!(BrentOptimizer::new(1e-10, 0.0).is_err());
        assert!(BrentOptimizer::new(MIN_RELATIVE_TOLERANCE, MIN_ABSOLUTE_TOLERANCE).is_ok());
    }

    #[test]
    fn rejects_bad_brackets() {
        let opt = optimizer();
        let err = opt.optimize(f64::sin, 1.0, 1.0, 1.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("bracket"), "{err}");
        assert!(opt.optimize(f64::sin, 0.0, 1.0, 0.0, 0.0).is_err());
        assert!(opt.optimize(f64::sin, 0.0, 1.0, 1.0, 0.0).is_err());
        assert!(opt.optimize(f64::sin, 0.0, 1.0, 2.0, 0.0).is_err());
        assert!(opt.optimize(f64::sin, f64::NAN, 1.0, 0.5, 0.0).is_err());
        assert!(opt.optimize(f64::sin, 0.0, f64::INFINITY, 0.5, 0.0).is_err());
    }

    #[test]
    fn sample_ordering_ranks_nan_last() {
        let nan = Sample {
            point: 0.0,
            value: f64::NAN,
        };
        let one = Sample {
            point: 1.0,
            value: 1.0,
        };
        let inf = Sample {
            point: 2.0,
            value: f64::INFINITY,
        };
        assert_eq!(nan.better(one).point, 1.0);
        assert_eq!(one.better(nan).point, 1.0);
        assert_eq!(inf.better(nan).point, 2.0);
        assert_eq!(one.better(inf).point, 1.0);
    }
}
