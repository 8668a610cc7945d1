pub mod column_layout;
pub mod month;
pub mod quarter;
