//! The persisted multi-year, multi-city archive table.

use crate::archive::error::ArchiveError;
use crate::archive::row::ArchiveRow;
use crate::archive::schema::{rainfall_columns, table_schema, CITY_COLUMN, YEAR_COLUMN};
use log::{debug, info, warn};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Handle on an archive table stored as a delimited text file.
///
/// The file holds one row per `(city, year)` with the columns listed in
/// [`crate::archive_header`]. Every write reads the whole table, changes it in memory and
/// rewrites the whole file. There is no locking: two processes writing the same table
/// at once can corrupt it.
///
/// # Examples
///
/// ```no_run
/// use rainfall_archive::ArchiveTable;
///
/// let table = ArchiveTable::new("database.csv");
/// let removed = table.delete("Aberporth", 1941)?;
/// let averages = table.sma("Aberporth", 1941, 1942, 2)?;
/// println!("removed: {removed}, averages: {averages:?}");
/// # Ok::<(), rainfall_archive::ArchiveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTable {
    path: PathBuf,
}

impl ArchiveTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes a table holding only the header row, replacing any existing file.
    pub fn create(&self) -> Result<(), ArchiveError> {
        let mut empty = DataFrame::empty_with_schema(&table_schema());
        self.save(&mut empty)?;
        info!("Created archive table at {:?}", self.path);
        Ok(())
    }

    /// Reads the full table.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::TableNotFound`] if the file does not exist, [`ArchiveError::Read`]
    /// if it cannot be parsed with the archive schema.
    pub fn load(&self) -> Result<DataFrame, ArchiveError> {
        if !self.exists() {
            return Err(ArchiveError::TableNotFound(self.path.clone()));
        }
        CsvReadOptions::default()
            .with_has_header(true)
            .with_schema(Some(Arc::new(table_schema())))
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| ArchiveError::Read(self.path.clone(), e))?
            .finish()
            .map_err(|e| ArchiveError::Read(self.path.clone(), e))
    }

    /// Whether a row keyed by `(city, year)` is present.
    pub fn contains(&self, city: &str, year: i32) -> Result<bool, ArchiveError> {
        let table = self.load()?;
        Ok(select_key(&table, city, year)?.height() > 0)
    }

    /// Appends `row` to the table, creating the table first if it does not exist.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::Duplicate`] if a row with the same city and year is already stored.
    /// The file is not touched in that case.
    pub fn insert(&self, row: &ArchiveRow) -> Result<(), ArchiveError> {
        if !self.exists() {
            self.create()?;
        }
        let table = self.load()?;
        if select_key(&table, &row.city, row.year)?.height() > 0 {
            warn!(
                "Duplicate record for {} {} rejected by {:?}",
                row.city, row.year, self.path
            );
            return Err(ArchiveError::Duplicate {
                city: row.city.clone(),
                year: row.year,
                path: self.path.clone(),
            });
        }

        let mut updated = table.vstack(&row.to_frame()?)?;
        self.save(&mut updated)?;
        info!(
            "Inserted record for {} {} into {:?}",
            row.city, row.year, self.path
        );
        Ok(())
    }

    /// Inserts `rows` in order, stopping at the first failure.
    ///
    /// Rows inserted before the failure stay in the table. Returns the number of rows added.
    pub fn import(&self, rows: &[ArchiveRow]) -> Result<usize, ArchiveError> {
        for (inserted, row) in rows.iter().enumerate() {
            if let Err(e) = self.insert(row) {
                debug!("Import into {:?} stopped after {} rows", self.path, inserted);
                return Err(e);
            }
        }
        Ok(rows.len())
    }

    /// Removes every row matching `(city, year)` exactly.
    ///
    /// Returns whether anything was removed. The file is only rewritten when a row was
    /// removed.
    pub fn delete(&self, city: &str, year: i32) -> Result<bool, ArchiveError> {
        let table = self.load()?;
        let mut kept = table
            .clone()
            .lazy()
            .filter(key_expr(city, year).not())
            .collect()?;

        if kept.height() == table.height() {
            info!("No such record exists in the database for {} {}!", city, year);
            return Ok(false);
        }
        self.save(&mut kept)?;
        info!("Record successfully deleted for {} {}!", city, year);
        Ok(true)
    }

    /// Simple moving averages of monthly rainfall for `city` over `start_year..=end_year`.
    ///
    /// The twelve rainfall values of every selected row are laid end to end in table
    /// order, then split into consecutive, non-overlapping windows of `window` values.
    /// Each complete window yields its mean; a trailing window shorter than `window` is
    /// dropped.
    ///
    /// # Errors
    ///
    /// * [`ArchiveError::InvalidWindow`] if `window` is zero.
    /// * [`ArchiveError::TableNotFound`] if the table does not exist.
    /// * [`ArchiveError::MissingRainfall`] if a selected row has an empty rainfall cell.
    pub fn sma(
        &self,
        city: &str,
        start_year: i32,
        end_year: i32,
        window: usize,
    ) -> Result<Vec<f64>, ArchiveError> {
        if window == 0 {
            return Err(ArchiveError::InvalidWindow);
        }
        let selected = self
            .load()?
            .lazy()
            .filter(
                col(CITY_COLUMN)
                    .eq(lit(city))
                    .and(col(YEAR_COLUMN).gt_eq(lit(start_year as i64)))
                    .and(col(YEAR_COLUMN).lt_eq(lit(end_year as i64))),
            )
            .collect()?;

        let years = selected.column(YEAR_COLUMN)?.i64()?;
        let rain_columns = rainfall_columns();
        let rain = rain_columns
            .iter()
            .map(|name| selected.column(name)?.f64())
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut values = Vec::with_capacity(selected.height() * rain.len());
        for row in 0..selected.height() {
            for column in &rain {
                let value = column.get(row).ok_or_else(|| ArchiveError::MissingRainfall {
                    city: city.to_string(),
                    year: years.get(row).unwrap_or_default(),
                })?;
                values.push(value);
            }
        }
        debug!(
            "Computing moving average over {} rainfall values for {} {}-{}",
            values.len(),
            city,
            start_year,
            end_year
        );

        Ok(values
            .chunks_exact(window)
            .map(|chunk| chunk.iter().sum::<f64>() / window as f64)
            .collect())
    }

    /// Rewrites the whole file from `frame`.
    fn save(&self, frame: &mut DataFrame) -> Result<(), ArchiveError> {
        let mut file =
            File::create(&self.path).map_err(|e| ArchiveError::Io(self.path.clone(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(frame)
            .map_err(|e| ArchiveError::Write(self.path.clone(), e))
    }
}

fn key_expr(city: &str, year: i32) -> Expr {
    col(CITY_COLUMN)
        .eq(lit(city))
        .and(col(YEAR_COLUMN).eq(lit(year as i64)))
}

fn select_key(table: &DataFrame, city: &str, year: i32) -> PolarsResult<DataFrame> {
    table.clone().lazy().filter(key_expr(city, year)).collect()
}
