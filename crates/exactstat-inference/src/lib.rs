//! Exact hypothesis tests over discrete distributions.
//!
//! [`BinomialTest`] and [`FisherExactTest`] are immutable configurations:
//! changing the alternative hypothesis returns a new value, so one instance can
//! be shared freely between threads. [`ClopperPearson`] computes exact
//! confidence intervals for a binomial proportion with a bounded optimizer.

pub mod alternative;
pub mod arguments;
pub mod interval;
pub mod result;
pub mod table;
mod two_sided;

pub use alternative::AlternativeHypothesis;
pub use binomial_test::BinomialTest;
pub use fisher_exact_test::FisherExactTest;
pub use interval::{ClopperPearson, ProportionInterval};
pub use result::SignificanceResult;
pub use table::ContingencyTable;
pub use two_sided::RELATIVE_TIE_TOLERANCE;
