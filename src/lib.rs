mod archive;
mod error;
mod loader;
mod record;
mod types;

pub use error::RainfallError;

pub use loader::cleaner::{clean_column, clean_frame, extract_number};
pub use loader::loader::Loader;

pub use record::listing::YearListing;
pub use record::record_store::RecordStore;

pub use archive::row::ArchiveRow;
pub use archive::schema::header as archive_header;
pub use archive::schema::{CITY_COLUMN, COLUMN_COUNT, YEAR_COLUMN};
pub use archive::table::ArchiveTable;

pub use types::column_layout::ColumnLayout;
pub use types::month::{MonthNumber, MONTHS_IN_YEAR, MONTH_ABBREVIATIONS};
pub use types::quarter::Quarter;

pub use archive::error::ArchiveError;
pub use loader::error::LoadError;
pub use record::error::RecordError;
