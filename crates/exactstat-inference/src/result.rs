use exactstat_error::Result;
use serde::Serialize;

use crate::arguments::check_significance_level;

/// Outcome of a significance test: the test statistic and its p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignificanceResult {
    statistic: f64,
    p_value: f64,
}

impl SignificanceResult {
    #[must_use]
    pub const fn new(statistic: f64, p_value: f64) -> Self {
        Self { statistic, p_value }
    }

    #[must_use]
    pub const fn statistic(&self) -> f64 {
        self.statistic
    }

    #[must_use]
    pub const fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Whether the null hypothesis is rejected at level `alpha`
    /// (`p_value < alpha`).
    ///
    /// # Errors
    ///
    /// `alpha` outside `(0, 0.5]`.
    pub fn reject(&self, alpha: f64) -> Result<bool> {
        let alpha = check_significance_level(alpha)?;
        Ok(self.p_value < alpha)
    }
}
