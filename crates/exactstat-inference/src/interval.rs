//! Clopper–Pearson exact confidence interval for a binomial proportion.
//!
//! For `k` successes in `n` trials at confidence `1 - alpha`, the lower bound
//! is the `p` with `P(X >= k; p) = alpha / 2` and the upper bound the `p` with
//! `P(X <= k; p) = alpha / 2`. Each root is located by minimizing
//! `|ln tail(p) - ln(alpha / 2)|` on the side of `k / n` where it lies. The
//! log keeps the objective steep where the tail is tiny, which matters for
//! bounds close to 0 or 1.

use exactstat_distribution::BinomialDistribution;
use exactstat_error::{Result, StatError};
use exactstat_optim::BrentOptimizer;
use serde::Serialize;
use tracing::debug;

use crate::arguments::check_finite;

/// Confidence level used when none is configured.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// A two-sided interval for a proportion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProportionInterval {
    lower: f64,
    upper: f64,
    confidence_level: f64,
}

impl ProportionInterval {
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub const fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Whether `p` lies in the closed interval.
    #[must_use]
    pub fn contains(&self, p: f64) -> bool {
        self.lower <= p && p <= self.upper
    }
}

/// Exact (Clopper–Pearson) interval estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClopperPearson {
    optimizer: BrentOptimizer,
}

impl ClopperPearson {
    #[must_use]
    pub const fn new(optimizer: BrentOptimizer) -> Self {
        Self { optimizer }
    }

    #[must_use]
    pub const fn optimizer(&self) -> &BrentOptimizer {
        &self.optimizer
    }

    /// Interval for the success probability after `successes` in `trials`.
    ///
    /// # Errors
    ///
    /// `trials == 0`, `successes > trials`, or `confidence_level` outside
    /// `[0.5, 1)`.
    pub fn interval(
        &self,
        trials: u64,
        successes: u64,
        confidence_level: f64,
    ) -> Result<ProportionInterval> {
        if trials == 0 {
            return Err(StatError::invalid_argument("number of trials", trials));
        }
        if successes > trials {
            return Err(StatError::out_of_range(
                "number of successes",
                successes,
                0,
                trials,
            ));
        }
        let confidence_level = check_finite("confidence level", confidence_level)?;
        if !(0.5..1.0).contains(&confidence_level) {
            return Err(StatError::invalid_argument(
                "confidence level",
                format!("{confidence_level} not in [0.5, 1)"),
            ));
        }
        let k = i64::try_from(successes)
            .map_err(|_| StatError::overflow(format!("number of successes {successes}")))?;

        let target = ((1.0 - confidence_level) / 2.0).ln();
        let observed = successes as f64 / trials as f64;
        let lower = if successes == 0 {
            0.0
        } else {
            self.locate(|p| tail_gap(trials, p, target, |dist| dist.sf(k - 1)), 0.0, observed)?
        };
        let upper = if successes == trials {
            1.0
        } else {
            self.locate(|p| tail_gap(trials, p, target, |dist| dist.cdf(k)), observed, 1.0)?
        };
        debug!(
            trials,
            successes,
            confidence_level,
            lower,
            upper,
            "clopper-pearson interval"
        );
        Ok(ProportionInterval {
            lower,
            upper,
            confidence_level,
        })
    }

    fn locate(&self, objective: impl Fn(f64) -> f64, lo: f64, hi: f64) -> Result<f64> {
        let start = 0.5 * (lo + hi);
        let optimum = self
            .optimizer
            .optimize(&objective, lo, hi, start, objective(start))?;
        Ok(optimum.point)
    }
}

/// `|ln tail(Bin(trials, p)) - target|`; NaN where `p` is not a probability.
fn tail_gap(
    trials: u64,
    p: f64,
    target: f64,
    tail: impl Fn(&BinomialDistribution) -> f64,
) -> f64 {
    BinomialDistribution::new(trials, p).map_or(f64::NAN, |dist| (tail(&dist).ln() - target).abs())
}
