//! In-memory rainfall record keyed by year, with validation and point editing.

use crate::record::error::RecordError;
use crate::record::listing::YearListing;
use crate::types::month::{MonthNumber, MONTHS_IN_YEAR};
use crate::types::quarter::Quarter;
use chrono::{Datelike, Local};
use log::info;
use std::collections::BTreeMap;

/// Monthly rainfall amounts for every loaded year.
///
/// Each year maps to a sequence of twelve optional values, one per calendar month.
/// A record is built once from a cleaned station table (see [`crate::Loader::load_yearly`])
/// and must pass [`RecordStore::validate`] before its contents are trusted. After that it is
/// edited in place; there is no history, so the last write to a month wins.
///
/// Operations that fail leave the record untouched: every argument is checked
/// before anything is written.
///
/// # Examples
///
/// ```
/// use rainfall_archive::RecordStore;
/// use std::collections::BTreeMap;
///
/// let mut years = BTreeMap::new();
/// years.insert(1941, vec![Some(10.0); 12]);
/// let mut record = RecordStore::new(years);
/// record.validate()?;
///
/// record.insert(1941, 12, 30.5)?;
/// assert_eq!(record.rainfall(1941, 12)?, Some(30.5));
/// # Ok::<(), rainfall_archive::RecordError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    years: BTreeMap<i32, Vec<Option<f64>>>,
}

impl RecordStore {
    pub fn new(years: BTreeMap<i32, Vec<Option<f64>>>) -> Self {
        Self { years }
    }

    /// Validates the record against today's calendar year.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::validate_as_of`].
    pub fn validate(&self) -> Result<(), RecordError> {
        self.validate_as_of(Local::now().year())
    }

    /// Checks every year against `current_year`.
    ///
    /// # Errors
    ///
    /// * [`RecordError::FutureYear`] if a year is later than `current_year`.
    /// * [`RecordError::InvalidLength`] if a year does not hold exactly 12 values.
    /// * [`RecordError::NegativeValue`] if any present value is below zero.
    pub fn validate_as_of(&self, current_year: i32) -> Result<(), RecordError> {
        for (&year, values) in &self.years {
            if year > current_year {
                return Err(RecordError::FutureYear { year, current_year });
            }
            if values.len() != MONTHS_IN_YEAR {
                return Err(RecordError::InvalidLength {
                    year,
                    found: values.len(),
                });
            }
            if let Some((i, value)) = values
                .iter()
                .enumerate()
                .find_map(|(i, v)| v.filter(|v| *v < 0.0).map(|v| (i, v)))
            {
                return Err(RecordError::NegativeValue {
                    year,
                    month: i as u32 + 1,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Years held in the record, in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn get(&self, year: i32) -> Option<&[Option<f64>]> {
        self.years.get(&year).map(Vec::as_slice)
    }

    /// Mean rainfall over the inclusive month range `start..=end`, rounded to 2 decimals.
    ///
    /// Months without a value are left out of both the sum and the count. The full
    /// listing of the year is emitted at `info` level before the result is returned.
    ///
    /// # Errors
    ///
    /// * [`RecordError::InvalidMonthRange`] if either month is outside 1..=12.
    /// * [`RecordError::InvertedRange`] if `start` is after `end`.
    /// * [`RecordError::YearNotFound`] if the year is not in the record.
    /// * [`RecordError::NoValues`] if no month in the range has a value.
    pub fn average(&self, year: i32, start: u32, end: u32) -> Result<f64, RecordError> {
        let (Some(first), Some(last)) = (MonthNumber::new(start), MonthNumber::new(end)) else {
            return Err(RecordError::InvalidMonthRange { start, end });
        };
        if first > last {
            return Err(RecordError::InvertedRange { start, end });
        }
        let values = self.values(year)?;
        info!("{}", YearListing::new(year, values));

        let present: Vec<f64> = values
            .iter()
            .skip(first.index())
            .take(last.index() - first.index() + 1)
            .flatten()
            .copied()
            .collect();
        if present.is_empty() {
            return Err(RecordError::NoValues { year, start, end });
        }

        let mean = present.iter().sum::<f64>() / present.len() as f64;
        let rounded = round_2(mean);
        info!("Average rainfall between {} and {}: {}", start, end, rounded);
        Ok(rounded)
    }

    /// Rainfall recorded for one month, `None` when the month has no value.
    ///
    /// # Errors
    ///
    /// [`RecordError::YearNotFound`] or [`RecordError::MonthOutOfRange`].
    pub fn rainfall(&self, year: i32, month: u32) -> Result<Option<f64>, RecordError> {
        let values = self.values(year)?;
        let month = MonthNumber::new(month).ok_or(RecordError::MonthOutOfRange(month))?;
        values
            .get(month.index())
            .copied()
            .ok_or(RecordError::InvalidLength {
                year,
                found: values.len(),
            })
    }

    /// Clears the value for one month.
    ///
    /// # Errors
    ///
    /// [`RecordError::YearNotFound`] or [`RecordError::MonthOutOfRange`].
    pub fn delete(&mut self, year: i32, month: u32) -> Result<(), RecordError> {
        *self.slot_mut(year, month)? = None;
        self.emit_listing(year);
        info!(
            "The record for the year {} month {} has been deleted successfully.",
            year, month
        );
        Ok(())
    }

    /// Overwrites the value for one month.
    ///
    /// # Errors
    ///
    /// [`RecordError::YearNotFound`], [`RecordError::MonthOutOfRange`] or
    /// [`RecordError::NegativeRainfall`].
    pub fn insert(&mut self, year: i32, month: u32, value: f64) -> Result<(), RecordError> {
        self.values(year)?;
        MonthNumber::new(month).ok_or(RecordError::MonthOutOfRange(month))?;
        if value < 0.0 {
            return Err(RecordError::NegativeRainfall(value));
        }
        *self.slot_mut(year, month)? = Some(value);
        self.emit_listing(year);
        info!(
            "The record for the year {} month {} has been successfully replaced with {}.",
            year, month, value
        );
        Ok(())
    }

    /// Replaces the three months of a quarter (`winter`, `spring`, `summer` or `autumn`).
    ///
    /// # Errors
    ///
    /// * [`RecordError::YearNotFound`] if the year is not in the record.
    /// * [`RecordError::UnknownQuarter`] if `quarter` is not one of the four names.
    /// * [`RecordError::QuarterLength`] if `values` does not hold exactly 3 entries.
    /// * [`RecordError::NegativeRainfall`] if any entry is negative.
    pub fn insert_quarter(
        &mut self,
        year: i32,
        quarter: &str,
        values: &[f64],
    ) -> Result<(), RecordError> {
        let current = self.values(year)?;
        let quarter: Quarter = quarter.parse()?;
        if values.len() != 3 {
            return Err(RecordError::QuarterLength(values.len()));
        }
        if let Some(&negative) = values.iter().find(|v| **v < 0.0) {
            return Err(RecordError::NegativeRainfall(negative));
        }
        let range = quarter.month_indices();
        if current.len() < range.end {
            return Err(RecordError::InvalidLength {
                year,
                found: current.len(),
            });
        }

        let slots = self.values_mut(year)?;
        for (slot, value) in slots[range].iter_mut().zip(values) {
            *slot = Some(*value);
        }
        self.emit_listing(year);
        info!(
            "The records for {} have been replaced with {:?} respectively.",
            quarter, values
        );
        Ok(())
    }

    /// All twelve month/value pairs of a year, ready for display.
    ///
    /// # Errors
    ///
    /// [`RecordError::YearNotFound`] if the year is not in the record.
    pub fn display_months(&self, year: i32) -> Result<YearListing<'_>, RecordError> {
        Ok(YearListing::new(year, self.values(year)?))
    }

    fn values(&self, year: i32) -> Result<&[Option<f64>], RecordError> {
        self.get(year).ok_or(RecordError::YearNotFound(year))
    }

    fn values_mut(&mut self, year: i32) -> Result<&mut Vec<Option<f64>>, RecordError> {
        self.years
            .get_mut(&year)
            .ok_or(RecordError::YearNotFound(year))
    }

    fn slot_mut(&mut self, year: i32, month: u32) -> Result<&mut Option<f64>, RecordError> {
        let values = self.values_mut(year)?;
        let month = MonthNumber::new(month).ok_or(RecordError::MonthOutOfRange(month))?;
        let found = values.len();
        values
            .get_mut(month.index())
            .ok_or(RecordError::InvalidLength { year, found })
    }

    fn emit_listing(&self, year: i32) {
        if let Some(values) = self.get(year) {
            info!("{}", YearListing::new(year, values));
        }
    }
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> RecordStore {
        let mut years = BTreeMap::new();
        years.insert(
            1941,
            vec![
                Some(114.0),
                Some(58.0),
                Some(101.1),
                Some(52.8),
                Some(60.0),
                Some(31.2),
                Some(70.3),
                Some(85.5),
                Some(22.0),
                Some(131.9),
                Some(108.4),
                Some(88.1),
            ],
        );
        years.insert(1942, vec![Some(10.0); 12]);
        RecordStore::new(years)
    }

    #[test]
    fn test_validate_accepts_sample() -> Result<(), RecordError> {
        sample_record().validate()?;
        sample_record().validate_as_of(1942)
    }

    #[test]
    fn test_validate_rejects_future_year() {
        let err = sample_record().validate_as_of(1941).unwrap_err();
        assert_eq!(
            err,
            RecordError::FutureYear {
                year: 1942,
                current_year: 1941
            }
        );

        let mut years = BTreeMap::new();
        years.insert(Local::now().year() + 1, vec![Some(1.0); 12]);
        assert!(matches!(
            RecordStore::new(years).validate(),
            Err(RecordError::FutureYear { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_length() {
        let mut years = BTreeMap::new();
        years.insert(2000, vec![Some(1.0); 11]);
        assert_eq!(
            RecordStore::new(years).validate(),
            Err(RecordError::InvalidLength {
                year: 2000,
                found: 11
            })
        );
    }

    #[test]
    fn test_validate_rejects_negative_value() {
        let mut values = vec![Some(1.0); 12];
        values[4] = Some(-0.5);
        let mut years = BTreeMap::new();
        years.insert(2000, values);
        assert_eq!(
            RecordStore::new(years).validate(),
            Err(RecordError::NegativeValue {
                year: 2000,
                month: 5,
                value: -0.5
            })
        );
    }

    #[test]
    fn test_validate_allows_missing_values() -> Result<(), RecordError> {
        let mut values = vec![Some(1.0); 12];
        values[0] = None;
        values[11] = None;
        let mut years = BTreeMap::new();
        years.insert(2000, values);
        RecordStore::new(years).validate()
    }

    #[test]
    fn test_average_full_year() -> Result<(), RecordError> {
        let record = sample_record();
        let values: Vec<f64> = record.get(1941).unwrap().iter().flatten().copied().collect();
        let expected = ((values.iter().sum::<f64>() / 12.0) * 100.0).round() / 100.0;
        assert_eq!(record.average(1941, 1, 12)?, expected);
        assert_eq!(record.average(1942, 1, 12)?, 10.0);
        Ok(())
    }

    #[test]
    fn test_average_partial_range_rounds() -> Result<(), RecordError> {
        let mut record = sample_record();
        record.insert_quarter(1942, "winter", &[1.0, 1.0, 2.0])?;
        // (1 + 1 + 2) / 3 = 1.333...
        assert_eq!(record.average(1942, 1, 3)?, 1.33);
        assert_eq!(record.average(1942, 3, 3)?, 2.0);
        Ok(())
    }

    #[test]
    fn test_average_skips_missing_months() -> Result<(), RecordError> {
        let mut record = sample_record();
        record.delete(1942, 2)?;
        record.insert(1942, 1, 20.0)?;
        assert_eq!(record.average(1942, 1, 3)?, 15.0);
        Ok(())
    }

    #[test]
    fn test_average_rejects_bad_ranges() {
        let record = sample_record();
        assert_eq!(
            record.average(1941, 0, 12),
            Err(RecordError::InvalidMonthRange { start: 0, end: 12 })
        );
        assert_eq!(
            record.average(1941, 1, 13),
            Err(RecordError::InvalidMonthRange { start: 1, end: 13 })
        );
        assert_eq!(
            record.average(1941, 6, 3),
            Err(RecordError::InvertedRange { start: 6, end: 3 })
        );
        // Range is checked before the year.
        assert!(matches!(
            record.average(1800, 0, 3),
            Err(RecordError::InvalidMonthRange { .. })
        ));
        assert_eq!(
            record.average(1800, 1, 3),
            Err(RecordError::YearNotFound(1800))
        );
    }

    #[test]
    fn test_average_of_empty_range() -> Result<(), RecordError> {
        let mut record = sample_record();
        record.delete(1942, 4)?;
        assert_eq!(
            record.average(1942, 4, 4),
            Err(RecordError::NoValues {
                year: 1942,
                start: 4,
                end: 4
            })
        );
        Ok(())
    }

    #[test]
    fn test_rainfall_lookup() -> Result<(), RecordError> {
        let record = sample_record();
        assert_eq!(record.rainfall(1941, 1)?, Some(114.0));
        assert_eq!(record.rainfall(1941, 12)?, Some(88.1));
        assert_eq!(record.rainfall(1950, 1), Err(RecordError::YearNotFound(1950)));
        assert_eq!(record.rainfall(1941, 13), Err(RecordError::MonthOutOfRange(13)));
        assert_eq!(record.rainfall(1941, 0), Err(RecordError::MonthOutOfRange(0)));
        Ok(())
    }

    #[test]
    fn test_delete_then_rainfall_is_absent() -> Result<(), RecordError> {
        let mut record = sample_record();
        record.delete(1941, 12)?;
        assert_eq!(record.rainfall(1941, 12)?, None);
        // Deleting twice is harmless.
        record.delete(1941, 12)?;
        assert_eq!(record.rainfall(1941, 12)?, None);
        Ok(())
    }

    #[test]
    fn test_delete_rejects_unknown_year_and_month() {
        let mut record = sample_record();
        let before = record.clone();
        assert_eq!(record.delete(1800, 1), Err(RecordError::YearNotFound(1800)));
        assert_eq!(record.delete(1941, 13), Err(RecordError::MonthOutOfRange(13)));
        assert_eq!(record, before);
    }

    #[test]
    fn test_insert_then_rainfall() -> Result<(), RecordError> {
        let mut record = sample_record();
        record.delete(1941, 12)?;
        record.insert(1941, 12, 30.5)?;
        assert_eq!(record.rainfall(1941, 12)?, Some(30.5));
        record.insert(1941, 12, 0.0)?;
        assert_eq!(record.rainfall(1941, 12)?, Some(0.0));
        Ok(())
    }

    #[test]
    fn test_insert_rejections_leave_record_untouched() {
        let mut record = sample_record();
        let before = record.clone();
        assert_eq!(record.insert(1800, 1, 1.0), Err(RecordError::YearNotFound(1800)));
        assert_eq!(record.insert(1941, 0, 1.0), Err(RecordError::MonthOutOfRange(0)));
        assert_eq!(
            record.insert(1941, 1, -1.0),
            Err(RecordError::NegativeRainfall(-1.0))
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_insert_quarter_winter() -> Result<(), RecordError> {
        let mut record = sample_record();
        record.insert_quarter(1941, "winter", &[0.0, 0.1, 0.2])?;
        assert_eq!(record.rainfall(1941, 1)?, Some(0.0));
        assert_eq!(record.rainfall(1941, 2)?, Some(0.1));
        assert_eq!(record.rainfall(1941, 3)?, Some(0.2));
        assert_eq!(record.rainfall(1941, 4)?, Some(52.8));
        Ok(())
    }

    #[test]
    fn test_insert_quarter_autumn() -> Result<(), RecordError> {
        let mut record = sample_record();
        record.insert_quarter(1942, "autumn", &[7.0, 8.0, 9.0])?;
        assert_eq!(record.rainfall(1942, 9)?, Some(10.0));
        assert_eq!(record.rainfall(1942, 10)?, Some(7.0));
        assert_eq!(record.rainfall(1942, 12)?, Some(9.0));
        Ok(())
    }

    #[test]
    fn test_insert_quarter_rejections() {
        let mut record = sample_record();
        let before = record.clone();
        assert_eq!(
            record.insert_quarter(1800, "winter", &[1.0, 2.0, 3.0]),
            Err(RecordError::YearNotFound(1800))
        );
        assert_eq!(
            record.insert_quarter(1941, "monsoon", &[1.0, 2.0, 3.0]),
            Err(RecordError::UnknownQuarter("monsoon".to_string()))
        );
        assert_eq!(
            record.insert_quarter(1941, "spring", &[1.0, 2.0]),
            Err(RecordError::QuarterLength(2))
        );
        assert_eq!(
            record.insert_quarter(1941, "summer", &[1.0, -2.0, 3.0]),
            Err(RecordError::NegativeRainfall(-2.0))
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_display_months() -> Result<(), RecordError> {
        let record = sample_record();
        let listing = record.display_months(1941)?;
        assert_eq!(listing.year(), 1941);
        let entries: Vec<_> = listing.entries().collect();
        assert_eq!(entries.len(), 12);
        assert_eq!(entries[0].0.abbreviation(), "Jan");
        assert_eq!(entries[11].1, Some(88.1));
        assert!(record.display_months(2001).is_err());
        Ok(())
    }

    #[test]
    fn test_error_taxonomy() {
        assert!(RecordError::YearNotFound(1).is_key());
        assert!(RecordError::MonthOutOfRange(13).is_validation());
        assert!(RecordError::UnknownQuarter("x".into()).is_validation());
        assert!(!RecordError::QuarterLength(2).is_key());
    }
}
