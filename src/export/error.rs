use crate::loading::error::LoadError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create output file '{0}'")]
    FileCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to open export file '{0}'")]
    FileOpen(PathBuf, #[source] std::io::Error),

    #[error("Failed to write '{0}'")]
    FileWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to build the output DataFrame")]
    FrameBuild(#[source] PolarsError),

    #[error("Failed to write CSV to '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("JSON processing failed for '{0}'")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Expected a JSON array of records in '{0}'")]
    NotRecords(PathBuf),

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}
