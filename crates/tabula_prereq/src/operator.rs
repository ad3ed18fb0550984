//! Comparison operators.

use std::fmt;
use std::str::FromStr;

use tabula_foundation::Error;

/// A comparison between a computed quantity and an operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal.
    Eq,
    /// Not equal.
    Neq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lteq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gteq,
}

impl Operator {
    /// Compares `lhs` against `rhs`.
    #[must_use]
    pub fn compare(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Neq => lhs != rhs,
            Self::Lt => lhs < rhs,
            Self::Lteq => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Gteq => lhs >= rhs,
        }
    }

    /// Returns the operator that holds exactly when this one does not.
    #[must_use]
    pub fn invert(self) -> Self {
        match self {
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
            Self::Lt => Self::Gteq,
            Self::Lteq => Self::Gt,
            Self::Gt => Self::Lteq,
            Self::Gteq => Self::Lt,
        }
    }

    /// Returns the operator's keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Lt => "LT",
            Self::Lteq => "LTEQ",
            Self::Gt => "GT",
            Self::Gteq => "GTEQ",
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EQ" => Ok(Self::Eq),
            "NEQ" => Ok(Self::Neq),
            "LT" => Ok(Self::Lt),
            "LTEQ" => Ok(Self::Lteq),
            "GT" => Ok(Self::Gt),
            "GTEQ" => Ok(Self::Gteq),
            _ => Err(Error::configuration(format!("unknown operator: {s}"))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
