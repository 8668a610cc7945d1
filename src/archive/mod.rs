pub mod error;
pub mod row;
pub mod schema;
pub mod table;
