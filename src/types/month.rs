use std::fmt;
use std::fmt::{Display, Formatter};

pub const MONTHS_IN_YEAR: usize = 12;

/// Three-letter month names in calendar order.
pub const MONTH_ABBREVIATIONS: [&str; MONTHS_IN_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month number, guaranteed to be within 1..=12.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct MonthNumber(u32);

impl MonthNumber {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(month: u32) -> Option<Self> {
        (1..=MONTHS_IN_YEAR as u32)
            .contains(&month)
            .then_some(Self(month))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Zero-based position of this month in a yearly sequence.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[self.index()]
    }
}

impl Display for MonthNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}
