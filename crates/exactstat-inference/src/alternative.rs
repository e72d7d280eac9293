use std::fmt;
use std::str::FromStr;

use exactstat_error::StatError;
use serde::{Deserialize, Serialize};

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlternativeHypothesis {
    /// The parameter differs from its null value in either direction.
    #[default]
    TwoSided,
    /// The parameter exceeds its null value.
    GreaterThan,
    /// The parameter is below its null value.
    LessThan,
}

impl AlternativeHypothesis {
    pub const ALL: [Self; 3] = [Self::TwoSided, Self::GreaterThan, Self::LessThan];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoSided => "two-sided",
            Self::GreaterThan => "greater-than",
            Self::LessThan => "less-than",
        }
    }
}

impl fmt::Display for AlternativeHypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlternativeHypothesis {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alternative| alternative.as_str() == s)
            .ok_or_else(|| StatError::invalid_argument("alternative hypothesis", s))
    }
}
