//! Binomial distribution over all integers.
//!
//! Cumulative probabilities come from `statrs` (regularized incomplete beta).
//! Point masses are evaluated in log space here rather than through
//! `statrs`, using a form where `x` and `n - x` enter symmetrically: the
//! two-sided test compares masses for equality, and at `p = 0.5` mirrored
//! outcomes must compare equal bit for bit.

use exactstat_error::{Result, StatError};
use statrs::distribution::{Binomial, DiscreteCDF};
use statrs::function::factorial::ln_factorial;

/// Binomial distribution `Bin(n, p)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialDistribution {
    trials: u64,
    probability: f64,
    ln_p: f64,
    ln_q: f64,
    inner: Binomial,
}

impl BinomialDistribution {
    /// Create `Bin(trials, probability)`.
    ///
    /// # Errors
    ///
    /// [`StatError::OutOfRange`] if `probability` is NaN or outside `[0, 1]`.
    pub fn new(trials: u64, probability: f64) -> Result<Self> {
        if probability.is_nan() || !(0.0..=1.0).contains(&probability) {
            return Err(StatError::out_of_range("probability", probability, 0, 1));
        }
        let inner = Binomial::new(probability, trials)
            .map_err(|err| StatError::invalid_argument("probability", err))?;
        Ok(Self {
            trials,
            probability,
            ln_p: probability.ln(),
            ln_q: (-probability).ln_1p(),
            inner,
        })
    }

    #[must_use]
    pub const fn trials(&self) -> u64 {
        self.trials
    }

    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// `P(X = x)`; zero outside `[0, n]`.
    #[must_use]
    pub fn pmf(&self, x: i64) -> f64 {
        let Ok(x) = u64::try_from(x) else {
            return 0.0;
        };
        if x > self.trials {
            return 0.0;
        }
        let y = self.trials - x;
        if self.probability == 0.0 {
            return if x == 0 { 1.0 } else { 0.0 };
        }
        if self.probability == 1.0 {
            return if y == 0 { 1.0 } else { 0.0 };
        }
        let (small, large) = if x <= y { (x, y) } else { (y, x) };
        let ln_choose = ln_factorial(self.trials) - (ln_factorial(small) + ln_factorial(large));
        let ln_mass = (x as f64) * self.ln_p + (y as f64) * self.ln_q;
        (ln_choose + ln_mass).exp()
    }

    /// `P(X <= x)` for any integer `x`.
    #[must_use]
    pub fn cdf(&self, x: i64) -> f64 {
        match u64::try_from(x) {
            Err(_) => 0.0,
            Ok(x) if x >= self.trials => 1.0,
            // Point masses at 0 or n.
            Ok(_) if self.probability == 0.0 => 1.0,
            Ok(_) if self.probability == 1.0 => 0.0,
            Ok(x) => self.inner.cdf(x),
        }
    }

    /// `P(X > x)` for any integer `x`.
    #[must_use]
    pub fn sf(&self, x: i64) -> f64 {
        match u64::try_from(x) {
            Err(_) => 1.0,
            Ok(x) if x >= self.trials => 0.0,
            Ok(_) if self.probability == 0.0 => 0.0,
            Ok(_) if self.probability == 1.0 => 1.0,
            Ok(x) => self.inner.sf(x),
        }
    }

    /// `ceil((n + 1) p) - 1`, clamped to `[0, n]`.
    #[must_use]
    pub fn lower_mode(&self) -> i64 {
        let scaled = (self.trials as f64 + 1.0) * self.probability;
        self.clamp_to_support(scaled.ceil() as i64 - 1)
    }

    /// `floor((n + 1) p)`, clamped to `[0, n]`.
    #[must_use]
    pub fn upper_mode(&self) -> i64 {
        let scaled = (self.trials as f64 + 1.0) * self.probability;
        self.clamp_to_support(scaled.floor() as i64)
    }

    fn clamp_to_support(&self, x: i64) -> i64 {
        x.clamp(0, i64::try_from(self.trials).unwrap_or(i64::MAX))
    }
}
