//! Error taxonomy for the exact-inference crates.
//!
//! Every fallible operation returns [`Result<T>`]. Failures are raised at the
//! point of detection and carry the offending value so a caller can tell which
//! argument was rejected without re-deriving it.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a [`StatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-domain input.
    InvalidArgument,
    /// An integer sum exceeded the representable range.
    Overflow,
    /// A required configuration value was absent.
    NullArgument,
}

impl ErrorKind {
    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::Overflow => "overflow",
            Self::NullArgument => "null_argument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary error type for the workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    /// An argument is outside its documented domain.
    #[error("invalid {what}: {value}")]
    InvalidArgument { what: String, value: String },

    /// A value lies outside a closed interval.
    #[error("{what} out of range: {value} not in [{lower}, {upper}]")]
    OutOfRange {
        what: String,
        value: String,
        lower: String,
        upper: String,
    },

    /// Integer arithmetic over caller data would not fit the integer domain.
    #[error("integer overflow: {what}")]
    Overflow { what: String },

    /// A required value was not supplied.
    #[error("missing required {what}")]
    NullArgument { what: String },

    /// Configuration text could not be parsed.
    #[error("configuration error: {detail}")]
    Config { detail: String },
}

impl StatError {
    /// Build an [`StatError::InvalidArgument`].
    pub fn invalid_argument(what: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::InvalidArgument {
            what: what.into(),
            value: value.to_string(),
        }
    }

    /// Build an [`StatError::OutOfRange`] for the closed interval `[lower, upper]`.
    pub fn out_of_range(
        what: impl Into<String>,
        value: impl fmt::Display,
        lower: impl fmt::Display,
        upper: impl fmt::Display,
    ) -> Self {
        Self::OutOfRange {
            what: what.into(),
            value: value.to_string(),
            lower: lower.to_string(),
            upper: upper.to_string(),
        }
    }

    /// Build an [`StatError::Overflow`].
    pub fn overflow(what: impl Into<String>) -> Self {
        Self::Overflow { what: what.into() }
    }

    /// Build an [`StatError::NullArgument`].
    pub fn null_argument(what: impl Into<String>) -> Self {
        Self::NullArgument { what: what.into() }
    }

    /// Build an [`StatError::Config`].
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Classification used by callers that only care about the failure family.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } | Self::OutOfRange { .. } | Self::Config { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::NullArgument { .. } => ErrorKind::NullArgument,
        }
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StatError>;
