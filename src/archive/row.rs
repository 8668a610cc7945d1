use crate::archive::error::ArchiveError;
use crate::archive::schema::{monthly_columns, CITY_COLUMN, MEASUREMENT_PREFIXES, YEAR_COLUMN};
use crate::archive::table::ArchiveTable;
use crate::types::month::MONTHS_IN_YEAR;
use polars::prelude::*;

/// One year of monthly observations for a city, as stored in the archive table.
///
/// Rows are keyed by `(city, year)`; an [`ArchiveTable`] never holds two rows with the
/// same key.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRow {
    pub city: String,
    pub year: i32,
    pub max_temp: [f64; MONTHS_IN_YEAR],
    pub min_temp: [f64; MONTHS_IN_YEAR],
    /// Days of air frost per month.
    pub air_frost: [f64; MONTHS_IN_YEAR],
    pub rainfall: [f64; MONTHS_IN_YEAR],
    pub sun_hours: [f64; MONTHS_IN_YEAR],
}

impl ArchiveRow {
    /// Builds a row from twelve consecutive cleaned table rows laid out as
    /// `[year, max_temp, min_temp, air_frost, rainfall, sun_hours]`.
    ///
    /// The year comes from the first row of the chunk. Returns `None` if the chunk
    /// does not hold exactly twelve rows.
    pub fn from_monthly_rows(city: &str, rows: &[[f64; 6]]) -> Option<Self> {
        if rows.len() != MONTHS_IN_YEAR {
            return None;
        }
        let column = |i: usize| -> [f64; MONTHS_IN_YEAR] {
            let mut values = [0.0; MONTHS_IN_YEAR];
            for (value, row) in values.iter_mut().zip(rows) {
                *value = row[i];
            }
            values
        };
        Some(Self {
            city: city.to_string(),
            year: rows[0][0] as i32,
            max_temp: column(1),
            min_temp: column(2),
            air_frost: column(3),
            rainfall: column(4),
            sun_hours: column(5),
        })
    }

    /// Inserts this row into `table`, see [`ArchiveTable::insert`].
    pub fn insert(&self, table: &ArchiveTable) -> Result<(), ArchiveError> {
        table.insert(self)
    }

    /// The 62 values of this row in table column order.
    pub fn measurements(&self) -> impl Iterator<Item = f64> + '_ {
        self.max_temp
            .iter()
            .chain(&self.min_temp)
            .chain(&self.air_frost)
            .chain(&self.rainfall)
            .chain(&self.sun_hours)
            .copied()
    }

    /// Single-row frame matching the archive table schema.
    pub(crate) fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns = vec![
            Column::new(CITY_COLUMN.into(), [self.city.as_str()]),
            Column::new(YEAR_COLUMN.into(), [self.year as i64]),
        ];
        let names = MEASUREMENT_PREFIXES
            .iter()
            .flat_map(|prefix| monthly_columns(prefix));
        for (name, value) in names.zip(self.measurements()) {
            columns.push(Column::new(name.into(), [value]));
        }
        DataFrame::new(columns)
    }
}
