//! The four fixed three-month groups used for bulk rainfall replacement.

use crate::record::error::RecordError;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// A group of three consecutive calendar months.
///
/// These are fixed calendar blocks, not meteorological seasons:
/// winter is January to March, spring April to June, summer July to September
/// and autumn October to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quarter {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [
        Quarter::Winter,
        Quarter::Spring,
        Quarter::Summer,
        Quarter::Autumn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quarter::Winter => "winter",
            Quarter::Spring => "spring",
            Quarter::Summer => "summer",
            Quarter::Autumn => "autumn",
        }
    }

    /// Zero-based month indices covered by this quarter.
    pub fn month_indices(&self) -> Range<usize> {
        let start = match self {
            Quarter::Winter => 0,
            Quarter::Spring => 3,
            Quarter::Summer => 6,
            Quarter::Autumn => 9,
        };
        start..start + 3
    }
}

impl FromStr for Quarter {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quarter::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| RecordError::UnknownQuarter(s.to_string()))
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
