/// Positional indices of the columns read from a raw station table.
///
/// Headers are not inspected: a table with columns in a different order
/// silently shifts meaning, so non-standard files need a custom layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub year: usize,
    pub max_temp: usize,
    pub min_temp: usize,
    pub air_frost: usize,
    pub rainfall: usize,
    pub sun_hours: usize,
}

impl ColumnLayout {
    /// Every position the cleaner converts to numbers, in archive order
    /// (year first, then the five monthly measurements).
    pub fn archive_positions(&self) -> [usize; 6] {
        [
            self.year,
            self.max_temp,
            self.min_temp,
            self.air_frost,
            self.rainfall,
            self.sun_hours,
        ]
    }

    pub(crate) fn widest(&self) -> usize {
        self.archive_positions().into_iter().max().unwrap_or(0)
    }
}

impl Default for ColumnLayout {
    /// Standard station layout: `yyyy, mm, tmax, tmin, af, rain, sun`.
    fn default() -> Self {
        Self {
            year: 0,
            max_temp: 2,
            min_temp: 3,
            air_frost: 4,
            rainfall: 5,
            sun_hours: 6,
        }
    }
}
