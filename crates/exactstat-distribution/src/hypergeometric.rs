//! Hypergeometric distribution with a cached probability table.
//!
//! Models the number of successes `X` in a sample of `n` items drawn without
//! replacement from a population of `N` items of which `K` are successes.
//!
//! The table is built once per instance: the mass at the mode is fixed to 1,
//! neighbouring masses follow from the consecutive-term ratio
//!
//! ```text
//! P(X = x + 1) / P(X = x) = (K - x)(n - x) / ((x + 1)(N - K - n + x + 1))
//! ```
//!
//! and the table is normalized at the end. No factorial or binomial
//! coefficient is ever formed, so the table does not overflow for any `u32`
//! parameters. Propagation stops early when a mass underflows to zero; values
//! past that point are below `f64::MIN_POSITIVE` relative to the mode and read
//! back as zero.
//!
//! Cumulative masses are summed once from each end of the table. `cdf` reads
//! the lower sums below the upper mode and `sf` reads the upper sums from the
//! upper mode on, so both tails keep full relative precision.

use exactstat_error::{Result, StatError};
use tracing::debug;

/// Hypergeometric distribution `Hyper(N, K, n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypergeometric {
    population_size: u32,
    successes: u32,
    sample_size: u32,
    lower_bound: i64,
    upper_bound: i64,
    lower_mode: i64,
    upper_mode: i64,
    /// Support value stored at index 0 of the tables.
    table_start: i64,
    /// Normalized point masses.
    mass: Vec<f64>,
    /// `lower_tail[i] = P(X <= table_start + i)`.
    lower_tail: Vec<f64>,
    /// `upper_tail[i] = P(X > table_start + i)`.
    upper_tail: Vec<f64>,
}

impl Hypergeometric {
    /// Create the distribution for population size `N`, `K` successes in the
    /// population and sample size `n`.
    ///
    /// # Errors
    ///
    /// [`StatError::InvalidArgument`] when `K > N` or `n > N`.
    pub fn new(population_size: u32, successes: u32, sample_size: u32) -> Result<Self> {
        if successes > population_size {
            return Err(StatError::invalid_argument(
                "number of successes",
                format!("{successes} exceeds population size {population_size}"),
            ));
        }
        if sample_size > population_size {
            return Err(StatError::invalid_argument(
                "sample size",
                format!("{sample_size} exceeds population size {population_size}"),
            ));
        }

        let big_n = i64::from(population_size);
        let k = i64::from(successes);
        let n = i64::from(sample_size);
        let lower_bound = (n - (big_n - k)).max(0);
        let upper_bound = n.min(k);
        let (lower_mode, upper_mode) = modes(big_n, k, n, lower_bound, upper_bound);

        let (table_start, weights) =
            mode_outward_weights(big_n, k, n, lower_bound, upper_bound, upper_mode);
        let total = weights.total();
        let mass: Vec<f64> = weights
            .below
            .iter()
            .rev()
            .chain(weights.above.iter())
            .map(|w| w / total)
            .collect();

        let mut lower_tail = Vec::with_capacity(mass.len());
        let mut running = 0.0;
        for p in &mass {
            running += p;
            lower_tail.push(running);
        }
        let mut upper_tail = vec![0.0; mass.len()];
        running = 0.0;
        for (i, p) in mass.iter().enumerate().rev() {
            upper_tail[i] = running;
            running += p;
        }

        let table_end = table_start + mass.len() as i64 - 1;
        if table_start > lower_bound || table_end < upper_bound {
            debug!(
                population_size,
                successes,
                sample_size,
                lower_bound,
                upper_bound,
                table_start,
                table_end,
                "hypergeometric table truncated where mass underflows"
            );
        }

        Ok(Self {
            population_size,
            successes,
            sample_size,
            lower_bound,
            upper_bound,
            lower_mode,
            upper_mode,
            table_start,
            mass,
            lower_tail,
            upper_tail,
        })
    }

    /// Population size `N`.
    #[must_use]
    pub const fn population_size(&self) -> u32 {
        self.population_size
    }

    /// Number of successes `K` in the population.
    #[must_use]
    pub const fn successes(&self) -> u32 {
        self.successes
    }

    /// Sample size `n`.
    #[must_use]
    pub const fn sample_size(&self) -> u32 {
        self.sample_size
    }

    /// Smallest value with non-zero probability: `max(0, n - (N - K))`.
    #[must_use]
    pub const fn support_lower_bound(&self) -> i64 {
        self.lower_bound
    }

    /// Largest value with non-zero probability: `min(n, K)`.
    #[must_use]
    pub const fn support_upper_bound(&self) -> i64 {
        self.upper_bound
    }

    /// Lower of the two modes.
    ///
    /// Equal to [`Self::upper_mode`] unless `(n + 1)(K + 1) / (N + 2)` is an
    /// integer, in which case both that value and the one below it carry the
    /// maximum mass.
    #[must_use]
    pub const fn lower_mode(&self) -> i64 {
        self.lower_mode
    }

    /// Upper of the two modes: `floor((n + 1)(K + 1) / (N + 2))`.
    #[must_use]
    pub const fn upper_mode(&self) -> i64 {
        self.upper_mode
    }

    /// Expected value `n K / N`.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.population_size == 0 {
            return 0.0;
        }
        f64::from(self.sample_size) * f64::from(self.successes) / f64::from(self.population_size)
    }

    /// Variance `n K (N - K)(N - n) / (N^2 (N - 1))`.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.population_size <= 1 {
            return 0.0;
        }
        let big_n = f64::from(self.population_size);
        let k = f64::from(self.successes);
        let n = f64::from(self.sample_size);
        n * k * (big_n - k) * (big_n - n) / (big_n * big_n * (big_n - 1.0))
    }

    /// `P(X = x)`.
    ///
    /// # Errors
    ///
    /// [`StatError::OutOfRange`] when `x` is outside the support. Callers
    /// bound their queries to the support before asking for a mass.
    pub fn pmf(&self, x: i64) -> Result<f64> {
        if x < self.lower_bound || x > self.upper_bound {
            return Err(StatError::out_of_range(
                "hypergeometric outcome",
                x,
                self.lower_bound,
                self.upper_bound,
            ));
        }
        Ok(self.table_index(x).map_or(0.0, |i| self.mass[i]))
    }

    /// `P(X <= x)` for any integer `x`.
    #[must_use]
    pub fn cdf(&self, x: i64) -> f64 {
        if x < self.lower_bound {
            0.0
        } else if x >= self.upper_bound {
            1.0
        } else if x < self.upper_mode {
            self.lower_tail_at(x)
        } else {
            1.0 - self.upper_tail_at(x)
        }
    }

    /// `P(X > x)` for any integer `x`.
    #[must_use]
    pub fn sf(&self, x: i64) -> f64 {
        if x < self.lower_bound {
            1.0
        } else if x >= self.upper_bound {
            0.0
        } else if x >= self.upper_mode {
            self.upper_tail_at(x)
        } else {
            1.0 - self.lower_tail_at(x)
        }
    }

    fn table_index(&self, x: i64) -> Option<usize> {
        let offset = usize::try_from(x - self.table_start).ok()?;
        (offset < self.mass.len()).then_some(offset)
    }

    fn lower_tail_at(&self, x: i64) -> f64 {
        if x < self.table_start {
            return 0.0;
        }
        self.table_index(x).map_or(1.0, |i| self.lower_tail[i])
    }

    fn upper_tail_at(&self, x: i64) -> f64 {
        if x < self.table_start {
            return 1.0;
        }
        self.table_index(x).map_or(0.0, |i| self.upper_tail[i])
    }
}

/// Both modes from exact integer arithmetic, clamped to the support.
fn modes(big_n: i64, k: i64, n: i64, lower_bound: i64, upper_bound: i64) -> (i64, i64) {
    let numerator = i128::from(n + 1) * i128::from(k + 1);
    let denominator = i128::from(big_n + 2);
    let mode = (numerator / denominator) as i64;
    let upper = mode.clamp(lower_bound, upper_bound);
    let lower = if numerator % denominator == 0 && mode - 1 >= lower_bound {
        (mode - 1).min(upper)
    } else {
        upper
    };
    (lower, upper)
}

/// Unnormalized masses around the mode.
struct ModeWeights {
    /// Masses at `mode - 1`, `mode - 2`, ... (nearest first).
    below: Vec<f64>,
    /// Masses at `mode`, `mode + 1`, ... (`above[0] == 1.0`).
    above: Vec<f64>,
}

impl ModeWeights {
    /// Sum with the smallest terms first on each side.
    fn total(&self) -> f64 {
        let below: f64 = self.below.iter().rev().sum();
        let above: f64 = self.above[1..].iter().rev().sum();
        below + above + self.above[0]
    }
}

fn mode_outward_weights(
    big_n: i64,
    k: i64,
    n: i64,
    lower_bound: i64,
    upper_bound: i64,
    mode: i64,
) -> (i64, ModeWeights) {
    // Failures in the population minus the sample size; x + rest >= 0 on the
    // support.
    let rest = big_n - k - n;

    let mut above = vec![1.0];
    let mut weight = 1.0_f64;
    let mut x = mode;
    while x < upper_bound {
        let num = i128::from(k - x) * i128::from(n - x);
        let den = i128::from(x + 1) * i128::from(rest + x + 1);
        weight *= num as f64 / den as f64;
        if weight == 0.0 {
            break;
        }
        above.push(weight);
        x += 1;
    }

    let mut below = Vec::new();
    weight = 1.0;
    x = mode;
    while x > lower_bound {
        let num = i128::from(x) * i128::from(rest + x);
        let den = i128::from(k - x + 1) * i128::from(n - x + 1);
        weight *= num as f64 / den as f64;
        if weight == 0.0 {
            break;
        }
        below.push(weight);
        x -= 1;
    }

    let start = mode - below.len() as i64;
    (start, ModeWeights { below, above })
}
