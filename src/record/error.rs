use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    // Validation of loaded data
    #[error("Only data for previous years can be entered: {year} is after {current_year}")]
    FutureYear { year: i32, current_year: i32 },

    #[error("Invalid data set for year {year}: expected 12 monthly values, found {found}")]
    InvalidLength { year: i32, found: usize },

    #[error("Unexpected negative value {value} for year {year} month {month}")]
    NegativeValue { year: i32, month: u32, value: f64 },

    // Validation of caller input
    #[error("Month {0} is out of range, it must be between 1 and 12")]
    MonthOutOfRange(u32),

    #[error("Invalid month range {start}..={end}, months must be between 1 and 12")]
    InvalidMonthRange { start: u32, end: u32 },

    #[error("Start month {start} is after end month {end}")]
    InvertedRange { start: u32, end: u32 },

    #[error("Quarter must be one of 'winter', 'spring', 'summer', 'autumn', got '{0}'")]
    UnknownQuarter(String),

    #[error("A quarter must have exactly 3 months of data, got {0}")]
    QuarterLength(usize),

    #[error("Rainfall cannot be a negative value: {0}")]
    NegativeRainfall(f64),

    // Lookups
    #[error("Data for year {0} not found in the record")]
    YearNotFound(i32),

    #[error("No rainfall values present for year {year} months {start}..={end}")]
    NoValues { year: i32, start: u32, end: u32 },
}

impl RecordError {
    /// True for errors caused by invalid data or arguments.
    pub fn is_validation(&self) -> bool {
        !self.is_key()
    }

    /// True for errors caused by a year that is not held in the record.
    pub fn is_key(&self) -> bool {
        matches!(self, RecordError::YearNotFound(_) | RecordError::NoValues { .. })
    }
}
