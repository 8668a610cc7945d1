use crate::types::month::MonthNumber;
use std::fmt;

/// A printable view of one year's twelve monthly rainfall values.
///
/// Renders as a `Year: <year>` line followed by one `<Mon>: <value>` line per month,
/// with `n/a` for months that have no value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearListing<'a> {
    year: i32,
    values: &'a [Option<f64>],
}

impl<'a> YearListing<'a> {
    pub(crate) fn new(year: i32, values: &'a [Option<f64>]) -> Self {
        Self { year, values }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month/value pairs in calendar order.
    pub fn entries(&self) -> impl Iterator<Item = (MonthNumber, Option<f64>)> + 'a {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| MonthNumber::new(i as u32 + 1).map(|m| (m, *v)))
    }
}

impl fmt::Display for YearListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year: {}", self.year)?;
        for (month, value) in self.entries() {
            match value {
                Some(v) => write!(f, "\n{}: {:?}", month, v)?,
                None => write!(f, "\n{}: n/a", month)?,
            }
        }
        Ok(())
    }
}
