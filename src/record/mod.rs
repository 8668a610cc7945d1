pub mod error;
pub mod listing;
pub mod record_store;
