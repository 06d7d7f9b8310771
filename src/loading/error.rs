use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read table from '{0}'")]
    Read(PathBuf, #[source] PolarsError),

    #[error("Failed to parse in-memory {table} table")]
    Parse {
        table: String,
        #[source]
        source: PolarsError,
    },

    #[error("Required column '{column}' not found in {table} table")]
    MissingColumn { table: String, column: String },

    #[error("Column '{column}' of {table} table could not be read as text")]
    ColumnType {
        table: String,
        column: String,
        #[source]
        source: PolarsError,
    },
}
