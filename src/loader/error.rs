use crate::record::error::RecordError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read station table '{0}'")]
    Read(PathBuf, #[source] PolarsError),

    #[error("Station table '{path}' has {width} columns, column position {position} is not available")]
    MissingColumn {
        path: PathBuf,
        position: usize,
        width: usize,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    // The yearly record built from the table did not pass validation
    #[error("An error occurred while reading the data in from '{path}'")]
    Validation {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
}
