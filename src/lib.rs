mod download;
mod error;
mod export;
mod frost;
mod frost_tool;
mod loading;
mod normalize;
mod stations;
mod types;
mod utils;

pub use error::FrostToolError;
pub use frost_tool::*;

pub use download::error::DownloadError;
pub use download::normals_downloader::*;
pub use export::csv_export::*;
pub use export::error::ExportError;
pub use export::json_export::*;
pub use export::sql_export::*;
pub use frost::frost_window::*;
pub use loading::daily_normals::load_daily_normals;
pub use loading::error::LoadError;
pub use loading::frame_reader::{parse_text_frame, read_text_frame, COMMA, TAB};
pub use loading::station_catalog::{load_station_catalog, StationCatalog, STATION_COLUMNS};
pub use loading::zip_centroids::load_zip_centroids;
pub use normalize::freeze_dates::*;
pub use normalize::normalizer::*;
pub use stations::locate_station::*;

pub use types::daily_normal::*;
pub use types::frost_profile::*;
pub use types::frost_window::*;
pub use types::station::*;
pub use types::zip_centroid::*;
