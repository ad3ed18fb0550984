//! Dice expressions such as `2d6+1`.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// `<times>d<sides>` plus an optional signed modifier.
///
/// A bare number (`3`) is a flat amount: no dice, only the modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dice {
    /// Number of dice rolled.
    pub times: u32,
    /// Faces per die; 0 for a flat amount.
    pub sides: u32,
    /// Added after rolling.
    pub modifier: i64,
}

impl Dice {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(times: u32, sides: u32, modifier: i64) -> Self {
        Self {
            times,
            sides,
            modifier,
        }
    }

    /// Smallest possible total.
    #[must_use]
    pub fn minimum(&self) -> i64 {
        i64::from(self.times) + self.modifier
    }

    /// Largest possible total.
    #[must_use]
    pub fn maximum(&self) -> i64 {
        i64::from(self.times) * i64::from(self.sides) + self.modifier
    }
}

fn invalid(text: &str) -> Error {
    Error::configuration(format!("invalid dice expression '{text}'"))
}

impl FromStr for Dice {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        let trimmed = text.trim();
        let Some((times, rest)) = trimmed.split_once(['d', 'D']) else {
            return trimmed
                .parse::<i64>()
                .map(|flat| Self::new(0, 0, flat))
                .map_err(|_| invalid(text));
        };

        let times = if times.is_empty() {
            1
        } else {
            times.parse::<u32>().map_err(|_| invalid(text))?
        };
        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(at) => (&rest[..at], rest[at..].parse::<i64>().map_err(|_| invalid(text))?),
            None => (rest, 0),
        };
        let sides = sides.parse::<u32>().map_err(|_| invalid(text))?;
        if sides == 0 {
            return Err(invalid(text));
        }
        Ok(Self::new(times, sides, modifier))
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sides == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.times, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}
