//! Two-sided exact p-value shared by the binomial and Fisher tests.
//!
//! The p-value is the total mass of outcomes no more likely than the observed
//! one. For a unimodal law those outcomes form a run `[lo, i]` below the modes
//! and a run `[j, hi]` above them. The observed value closes one run; the
//! other is found by binary search on the far side of the modes, and the
//! p-value is read from the cumulative functions instead of summing masses.
//! Masses are compared with a small relative slack so that outcomes tied in
//! exact arithmetic stay tied after rounding.

use exactstat_distribution::{
    BinomialDistribution, Hypergeometric, search_ascending, search_descending,
};
use tracing::debug;

/// What the two-sided rule needs from a unimodal integer distribution.
pub trait UnimodalLaw {
    fn support(&self) -> (i64, i64);
    fn modes(&self) -> (i64, i64);
    /// `P(X = x)`; callers stay inside the support.
    fn mass(&self, x: i64) -> f64;
    fn cdf(&self, x: i64) -> f64;
    fn sf(&self, x: i64) -> f64;
}

impl UnimodalLaw for BinomialDistribution {
    fn support(&self) -> (i64, i64) {
        (0, i64::try_from(self.trials()).unwrap_or(i64::MAX))
    }

    fn modes(&self) -> (i64, i64) {
        (self.lower_mode(), self.upper_mode())
    }

    fn mass(&self, x: i64) -> f64 {
        self.pmf(x)
    }

    fn cdf(&self, x: i64) -> f64 {
        Self::cdf(self, x)
    }

    fn sf(&self, x: i64) -> f64 {
        Self::sf(self, x)
    }
}

impl UnimodalLaw for Hypergeometric {
    fn support(&self) -> (i64, i64) {
        (self.support_lower_bound(), self.support_upper_bound())
    }

    fn modes(&self) -> (i64, i64) {
        (self.lower_mode(), self.upper_mode())
    }

    fn mass(&self, x: i64) -> f64 {
        self.pmf(x).unwrap_or(0.0)
    }

    fn cdf(&self, x: i64) -> f64 {
        Self::cdf(self, x)
    }

    fn sf(&self, x: i64) -> f64 {
        Self::sf(self, x)
    }
}

/// Relative slack under which two masses count as tied.
///
/// Masses that are equal in exact arithmetic can differ in the last bits once
/// computed, most often on opposite sides of the modes.
pub const RELATIVE_TIE_TOLERANCE: f64 = 1e-7;

/// Mass of all outcomes `x` with `P(X = x) <= P(X = observed)`, ties taken
/// to within [`RELATIVE_TIE_TOLERANCE`].
pub fn two_sided_p_value<D: UnimodalLaw>(dist: &D, observed: i64) -> f64 {
    let (lo, hi) = dist.support();
    let (lower_mode, upper_mode) = dist.modes();

    if (lower_mode..=upper_mode).contains(&observed) {
        // Two modes are exactly tied, so nothing is more likely than either.
        debug!(observed, lower_mode, upper_mode, "two-sided: observed at a mode");
        return 1.0;
    }

    let target = dist.mass(observed) * (1.0 + RELATIVE_TIE_TOLERANCE);
    let i = search_ascending(lo, lower_mode, target, |x| dist.mass(x));
    let j = search_descending(upper_mode, hi, target, |x| dist.mass(x));
    if observed < lower_mode {
        debug!(observed, i, j, "two-sided: observed in lower tail");
    } else {
        debug!(observed, i, j, "two-sided: observed in upper tail");
    }

    if j <= i + 1 {
        1.0
    } else {
        dist.cdf(i) + dist.sf(j - 1)
    }
}
