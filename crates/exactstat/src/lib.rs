//! Exact hypothesis tests over discrete distributions.
//!
//! This crate re-exports the workspace's public surface and adds the TOML
//! configuration layer in [`config`].
//!
//! ```
//! use exactstat::{AlternativeHypothesis, ContingencyTable, FisherExactTest};
//!
//! let table = ContingencyTable::new(6, 2, 1, 4)?;
//! let result = FisherExactTest::default()
//!     .with(AlternativeHypothesis::GreaterThan)
//!     .test(&table)?;
//! assert!(result.p_value() < 0.1);
//! # Ok::<(), exactstat::StatError>(())
//! ```

pub mod config;

pub use config::{InferenceConfig, IntervalConfig, OptimizerConfig};
pub use exactstat_distribution::{
    BinomialDistribution, Hypergeometric, search_ascending, search_descending,
};
pub use exactstat_error::{ErrorKind, Result, StatError};
pub use exactstat_inference::{
    AlternativeHypothesis, BinomialTest, ClopperPearson, ContingencyTable, FisherExactTest,
    ProportionInterval, SignificanceResult, arguments,
};
pub use exactstat_optim::{BrentOptimizer, Optimum};
