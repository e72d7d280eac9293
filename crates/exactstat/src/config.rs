//! TOML configuration for the exact tests.
//!
//! ```toml
//! alternative = "greater-than"
//!
//! [optimizer]
//! relative_tolerance = 1e-10
//! absolute_tolerance = 1e-14
//!
//! [interval]
//! confidence_level = 0.95
//! ```
//!
//! `alternative` has no default when read from a document: omitting it leaves
//! the selection absent, and building a test from such a configuration fails
//! with [`StatError::NullArgument`]. The `[optimizer]` and `[interval]` tables
//! may be omitted entirely.

use std::path::Path;

use exactstat_error::{Result, StatError};
use exactstat_inference::interval::DEFAULT_CONFIDENCE_LEVEL;
use exactstat_inference::{AlternativeHypothesis, BinomialTest, ClopperPearson, FisherExactTest};
use exactstat_optim::{BrentOptimizer, DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InferenceConfig {
    /// Alternative hypothesis for both tests.
    pub alternative: Option<AlternativeHypothesis>,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub interval: IntervalConfig,
}

/// Convergence tolerances for [`BrentOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    pub relative_tolerance: f64,
    pub absolute_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
        }
    }
}

/// Settings for interval estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntervalConfig {
    /// Coverage of the interval, in `[0.5, 1)`.
    pub confidence_level: f64,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            alternative: Some(AlternativeHypothesis::default()),
            optimizer: OptimizerConfig::default(),
            interval: IntervalConfig::default(),
        }
    }
}

impl InferenceConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| StatError::config(err.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| StatError::config(format!("{}: {err}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        debug!(
            path = %path.display(),
            alternative = ?config.alternative,
            "loaded inference configuration"
        );
        Ok(config)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| StatError::config(err.to_string()))
    }

    /// The configured alternative hypothesis.
    ///
    /// # Errors
    ///
    /// [`StatError::NullArgument`] when the document did not name one.
    pub fn alternative(&self) -> Result<AlternativeHypothesis> {
        self.alternative
            .ok_or_else(|| StatError::null_argument("alternative hypothesis"))
    }

    pub fn binomial_test(&self) -> Result<BinomialTest> {
        Ok(BinomialTest::new(self.alternative()?))
    }

    pub fn fisher_exact_test(&self) -> Result<FisherExactTest> {
        Ok(FisherExactTest::new(self.alternative()?))
    }

    pub fn optimizer(&self) -> Result<BrentOptimizer> {
        BrentOptimizer::new(
            self.optimizer.relative_tolerance,
            self.optimizer.absolute_tolerance,
        )
    }

    pub fn clopper_pearson(&self) -> Result<ClopperPearson> {
        Ok(ClopperPearson::new(self.optimizer()?))
    }

    /// The configured confidence level, checked against `[0.5, 1)`.
    pub fn confidence_level(&self) -> Result<f64> {
        let level = self.interval.confidence_level;
        if (0.5..1.0).contains(&level) {
            Ok(level)
        } else {
            Err(StatError::invalid_argument(
                "confidence level",
                format!("{level} not in [0.5, 1)"),
            ))
        }
    }

    /// Check every field by building each component once.
    pub fn validate(&self) -> Result<()> {
        self.alternative()?;
        self.optimizer()?;
        self.confidence_level()?;
        Ok(())
    }
}
