pub mod error;
pub mod normals_downloader;
