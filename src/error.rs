use crate::archive::error::ArchiveError;
use crate::loader::error::LoadError;
use crate::record::error::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainfallError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
