pub mod csv_export;
pub mod error;
pub mod json_export;
pub mod sql_export;
