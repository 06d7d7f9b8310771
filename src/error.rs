use crate::download::error::DownloadError;
use crate::export::error::ExportError;
use crate::loading::error::LoadError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrostToolError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Background task failed")]
    TaskJoin(#[from] tokio::task::JoinError),
}
