use crate::archive::row::ArchiveRow;
use crate::archive::table::ArchiveTable;
use crate::error::RainfallError;
use crate::loader::cleaner::clean_frame;
use crate::loader::error::LoadError;
use crate::record::record_store::RecordStore;
use crate::types::column_layout::ColumnLayout;
use crate::types::month::MONTHS_IN_YEAR;
use bon::bon;
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reads a raw station table and turns it into a [`RecordStore`] or into [`ArchiveRow`]s.
///
/// The table must have a header row; after the header, columns are addressed purely by
/// position through the [`ColumnLayout`]. Every cell at a layout position is cleaned
/// with [`crate::extract_number`], so cells like `114.0*` become `114.0` and cells
/// without a numeral become null.
///
/// # Examples
///
/// ```no_run
/// use rainfall_archive::Loader;
///
/// let loader = Loader::builder()
///     .path("data/aberporth.csv")
///     .build();
///
/// let record = loader.load_yearly()?;
/// println!("{}", record.display_months(1941)?);
/// # Ok::<(), rainfall_archive::RainfallError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    path: PathBuf,
    skip_rows: usize,
    separator: u8,
    layout: ColumnLayout,
}

#[bon]
impl Loader {
    /// Configures a loader for the table at `path`.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.skip_rows(usize)`: preamble lines before the header row (default 0).
    /// * `.separator(u8)`: field delimiter (default `b','`).
    /// * `.layout(ColumnLayout)`: column positions (default [`ColumnLayout::default`]).
    #[builder]
    pub fn new(
        #[builder(into)] path: PathBuf,
        skip_rows: Option<usize>,
        separator: Option<u8>,
        layout: Option<ColumnLayout>,
    ) -> Self {
        Self {
            path,
            skip_rows: skip_rows.unwrap_or(0),
            separator: separator.unwrap_or(b','),
            layout: layout.unwrap_or_default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Reads the table with every column as text.
    ///
    /// Rows longer than the header (e.g. trailing `Provisional` markers) are truncated.
    pub fn read_raw(&self) -> Result<DataFrame, LoadError> {
        let separator = self.separator;
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_skip_rows(self.skip_rows)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|options| {
                options
                    .with_separator(separator)
                    .with_truncate_ragged_lines(true)
            })
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| LoadError::Read(self.path.clone(), e))?
            .finish()
            .map_err(|e| LoadError::Read(self.path.clone(), e))?;

        if frame.width() <= self.layout.widest() {
            return Err(LoadError::MissingColumn {
                path: self.path.clone(),
                position: self.layout.widest(),
                width: frame.width(),
            });
        }
        debug!(
            "Read {} rows and {} columns from {:?}",
            frame.height(),
            frame.width(),
            self.path
        );
        Ok(frame)
    }

    /// The raw table with every layout column converted to nullable `Float64`.
    pub fn cleaned_frame(&self) -> Result<DataFrame, LoadError> {
        let raw = self.read_raw()?;
        Ok(clean_frame(&raw, &self.layout.archive_positions())?)
    }

    /// Builds and validates the per-year rainfall record.
    ///
    /// Rows are grouped by the year column, keeping table order inside each year, and
    /// each year collects the rainfall cell of its rows. Rows without a year are skipped.
    ///
    /// # Errors
    ///
    /// [`LoadError::Validation`] if the grouped record fails [`RecordStore::validate`]; no
    /// partial record is returned. Read errors are passed through.
    pub fn load_yearly(&self) -> Result<RecordStore, LoadError> {
        let frame = self.cleaned_frame()?;
        let years = self.numeric_values(&frame, self.layout.year)?;
        let rainfall = self.numeric_values(&frame, self.layout.rainfall)?;

        let mut grouped: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();
        let mut skipped = 0;
        for (year, value) in years.into_iter().zip(rainfall) {
            match year {
                Some(year) => grouped.entry(year as i32).or_default().push(value),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("Skipped {} rows without a year in {:?}", skipped, self.path);
        }

        let record = RecordStore::new(grouped);
        if let Err(source) = record.validate() {
            warn!(
                "An error occurred while reading the data in from {:?}: {}",
                self.path, source
            );
            return Err(LoadError::Validation {
                path: self.path.clone(),
                source,
            });
        }
        info!(
            "Loaded rainfall for {} years from {:?}",
            record.years().count(),
            self.path
        );
        Ok(record)
    }

    /// Splits the table into yearly archive rows for `city`.
    ///
    /// Rows with any empty layout cell are dropped, then the remaining rows are taken
    /// in blocks of twelve; each block becomes one row keyed by the year of its first
    /// line. The table must already be in chronological order. A trailing block of
    /// fewer than twelve rows is skipped.
    pub fn load_archive_rows(&self, city: &str) -> Result<Vec<ArchiveRow>, LoadError> {
        let frame = self.cleaned_frame()?;
        let columns = self
            .layout
            .archive_positions()
            .map(|position| self.numeric_values(&frame, position))
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let complete: Vec<[f64; 6]> = (0..frame.height())
            .filter_map(|row| {
                let mut values = [0.0; 6];
                for (value, column) in values.iter_mut().zip(&columns) {
                    *value = column[row]?;
                }
                Some(values)
            })
            .collect();
        let dropped = frame.height() - complete.len();
        if dropped > 0 {
            debug!("Dropped {} incomplete rows from {:?}", dropped, self.path);
        }

        let mut rows = Vec::with_capacity(complete.len() / MONTHS_IN_YEAR);
        for chunk in complete.chunks(MONTHS_IN_YEAR) {
            match ArchiveRow::from_monthly_rows(city, chunk) {
                Some(row) => rows.push(row),
                None => warn!(
                    "Skipping {} trailing rows from {:?}, a year needs {} rows",
                    chunk.len(),
                    self.path,
                    MONTHS_IN_YEAR
                ),
            }
        }
        info!(
            "Built {} archive rows for {} from {:?}",
            rows.len(),
            city,
            self.path
        );
        Ok(rows)
    }

    /// Loads the archive rows for `city` and inserts them into `table` in order.
    ///
    /// Stops at the first row that cannot be inserted, e.g. a duplicate.
    pub fn archive_into(&self, city: &str, table: &ArchiveTable) -> Result<usize, RainfallError> {
        let rows = self.load_archive_rows(city)?;
        Ok(table.import(&rows)?)
    }

    fn numeric_values(
        &self,
        frame: &DataFrame,
        position: usize,
    ) -> Result<Vec<Option<f64>>, LoadError> {
        let column = frame
            .select_at_idx(position)
            .ok_or_else(|| LoadError::MissingColumn {
                path: self.path.clone(),
                position,
                width: frame.width(),
            })?;
        Ok(column.f64()?.into_iter().collect())
    }
}
