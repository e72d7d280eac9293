//! Derivative-free minimization on a bracket.
//!
//! [`BrentOptimizer`] is independent of the distribution and test crates; the
//! inference layer uses it wherever a continuous search is needed.

pub mod brent;

pub use brent::{
    BrentOptimizer, DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE, MAX_EVALUATIONS,
    MIN_ABSOLUTE_TOLERANCE, MIN_RELATIVE_TOLERANCE, Optimum,
};
