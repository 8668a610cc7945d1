//! Column layout of the persisted archive table.
//!
//! `city, yyyy, mx1..mx12, mn1..mn12, af1..af12, r1..r12, s1..s12` (62 columns).

use crate::types::month::MONTHS_IN_YEAR;
use polars::prelude::{DataType, Schema};

pub const CITY_COLUMN: &str = "city";
pub const YEAR_COLUMN: &str = "yyyy";

// Max temperature, min temperature, air frost days, rainfall, sun hours
pub(crate) const MEASUREMENT_PREFIXES: [&str; 5] = ["mx", "mn", "af", "r", "s"];
const RAINFALL_PREFIX: &str = "r";

pub const COLUMN_COUNT: usize = 2 + MEASUREMENT_PREFIXES.len() * MONTHS_IN_YEAR;

pub(crate) fn monthly_columns(prefix: &str) -> Vec<String> {
    (1..=MONTHS_IN_YEAR)
        .map(|month| format!("{}{}", prefix, month))
        .collect()
}

pub(crate) fn rainfall_columns() -> Vec<String> {
    monthly_columns(RAINFALL_PREFIX)
}

/// All column names of the archive table, in file order.
pub fn header() -> Vec<String> {
    let mut names = vec![CITY_COLUMN.to_string(), YEAR_COLUMN.to_string()];
    for prefix in MEASUREMENT_PREFIXES {
        names.extend(monthly_columns(prefix));
    }
    names
}

/// Typed schema used to read the table back: text city, integer year, float measurements.
pub(crate) fn table_schema() -> Schema {
    let mut schema = Schema::with_capacity(COLUMN_COUNT);
    for name in header() {
        let dtype = match name.as_str() {
            CITY_COLUMN => DataType::String,
            YEAR_COLUMN => DataType::Int64,
            _ => DataType::Float64,
        };
        schema.with_column(name.into(), dtype);
    }
    schema
}
