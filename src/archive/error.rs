use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Duplicate record for {city} {year} cannot be added to '{path}'")]
    Duplicate {
        city: String,
        year: i32,
        path: PathBuf,
    },

    #[error("Archive table '{0}' does not exist")]
    TableNotFound(PathBuf),

    #[error("Failed to read archive table '{0}'")]
    Read(PathBuf, #[source] PolarsError),

    #[error("Failed to write archive table '{0}'")]
    Write(PathBuf, #[source] PolarsError),

    #[error("I/O error on archive table '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Moving average window must be at least 1")]
    InvalidWindow,

    #[error("Missing rainfall value in archived row for {city} {year}")]
    MissingRainfall { city: String, year: i64 },
}
