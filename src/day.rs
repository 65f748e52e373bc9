use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const FIRST_DAY: u8 = 1;
pub const LAST_DAY: u8 = 25;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Day must be a number between {FIRST_DAY} and {LAST_DAY} (got {0:?})")]
pub struct DayError(pub String);

/// A puzzle day, always within 1..=25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u8);

impl Day {
    /// Two-digit form used in directory names: `7` → `"07"`.
    pub fn padded(self) -> String {
        format!("{:02}", self.0)
    }

    pub fn all() -> impl Iterator<Item = Day> {
        (FIRST_DAY..=LAST_DAY).map(Day)
    }
}

impl TryFrom<u32> for Day {
    type Error = DayError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        if (FIRST_DAY as u32..=LAST_DAY as u32).contains(&n) {
            Ok(Day(n as u8))
        } else {
            Err(DayError(n.to_string()))
        }
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s.trim().parse().map_err(|_| DayError(s.to_string()))?;
        Day::try_from(n)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The (day, year) pair identifying one puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleId {
    pub day: Day,
    pub year: i32,
}
