use crate::loading::error::LoadError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse link selector: {0}")]
    Selector(String),

    #[error("Failed to parse station file {0}")]
    StationFile(String, #[source] LoadError),

    #[error("Failed to assemble station normals table")]
    FrameBuild(#[source] PolarsError),

    #[error("Failed to create output file '{0}'")]
    FileCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write station normals to '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
