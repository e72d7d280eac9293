//! Discrete distributions used by the exact tests.
//!
//! [`Hypergeometric`] caches its probability table at construction so that
//! repeated pmf/cdf/sf queries over one support are table lookups.
//! [`BinomialDistribution`] evaluates closed forms per call. The [`search`]
//! helpers locate the edge of a monotone run of point masses.

pub mod binomial;
pub mod hypergeometric;
pub mod search;

pub use binomial::BinomialDistribution;
pub use hypergeometric::Hypergeometric;
pub use search::{search_ascending, search_descending};
