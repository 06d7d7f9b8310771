pub mod daily_normals;
pub mod error;
pub mod frame_reader;
pub mod station_catalog;
pub mod zip_centroids;
