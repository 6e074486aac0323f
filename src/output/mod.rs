//! Output formatting for tables and JSON

pub mod json;
pub mod table;
