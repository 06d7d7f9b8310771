//! Entry point that wires the loaders, the frost core and the exporters together.
//!
//! A [`FrostTool`] is created from a [`FrostToolConfig`] and either runs the
//! whole lookup-table build or downloads fresh station normals.

use crate::download::normals_downloader::{
    DownloadSummary, NormalsDownloader, DEFAULT_CONCURRENCY, NORMALS_LISTING_URL,
};
use crate::error::FrostToolError;
use crate::export::csv_export::write_profiles_csv;
use crate::export::error::ExportError;
use crate::export::json_export::write_profiles_json;
use crate::export::sql_export::{profiles_to_sql, write_sql, FROST_LOOKUP_TABLE};
use crate::frost::frost_window::compute_frost_windows;
use crate::loading::daily_normals::load_daily_normals;
use crate::loading::error::LoadError;
use crate::loading::frame_reader::{read_text_frame, COMMA, TAB};
use crate::loading::station_catalog::{load_station_catalog, StationCatalog};
use crate::loading::zip_centroids::load_zip_centroids;
use crate::normalize::normalizer::{FrostProfileNormalizer, NormalizationOutcome};
use crate::stations::locate_station::StationMatcher;
use crate::types::daily_normal::DailyTemperatureRecord;
use crate::types::frost_profile::ZipFrostProfile;
use crate::types::station::Station;
use crate::types::zip_centroid::ZipCentroid;
use crate::utils::ensure_dir_exists;
use bon::{bon, Builder};
use log::info;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "data_output";
pub const CSV_FILE_NAME: &str = "frost_tool_dict.csv";
pub const JSON_FILE_NAME: &str = "frost_tool_dict.json";
pub const SQL_FILE_NAME: &str = "frost_tool.sql";

/// Paths and download settings for one run.
///
/// # Examples
///
/// ```
/// use frost_normals::FrostToolConfig;
///
/// let config = FrostToolConfig::builder()
///     .station_normals("data_raw/frost_data_raw.csv")
///     .zip_centroids("data_raw/2021_Gaz_zcta_national.txt")
///     .daily_normals("data_built/daily_normals.csv")
///     .build();
/// assert_eq!(config.output_dir.to_str(), Some("data_output"));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct FrostToolConfig {
    /// Combined station normals table, as written by the downloader.
    #[builder(into)]
    pub station_normals: PathBuf,
    /// Census Gazetteer ZCTA file.
    #[builder(into)]
    pub zip_centroids: PathBuf,
    /// Daily minimum temperature normals.
    #[builder(into)]
    pub daily_normals: PathBuf,
    /// Directory receiving the CSV, JSON and SQL exports.
    #[builder(into, default = PathBuf::from(DEFAULT_OUTPUT_DIR))]
    pub output_dir: PathBuf,
    /// Field separator of the Gazetteer file.
    #[builder(default = TAB)]
    pub zip_separator: u8,
    /// Directory listing of the per-station annual/seasonal normals files.
    #[builder(into, default = NORMALS_LISTING_URL.to_string())]
    pub normals_listing_url: String,
    /// Station files downloaded at once.
    #[builder(default = DEFAULT_CONCURRENCY)]
    pub download_concurrency: usize,
}

/// The three input tables, validated.
#[derive(Debug, Clone)]
pub struct FrostInputs {
    pub catalog: StationCatalog,
    pub zips: Vec<ZipCentroid>,
    pub daily: Vec<DailyTemperatureRecord>,
}

/// Where the exports were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
    pub sql: PathBuf,
}

impl ExportPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            csv: dir.join(CSV_FILE_NAME),
            json: dir.join(JSON_FILE_NAME),
            sql: dir.join(SQL_FILE_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub profiles: usize,
    pub excluded_zipcodes: usize,
    pub dropped_station_rows: usize,
    pub outputs: ExportPaths,
}

/// Joins stations, ZIP centroids and daily normals into frost profiles.
///
/// Frost windows are computed per station, each ZIP centroid is matched to its
/// nearest station, and the matches are normalized and ordered by ZIP code.
pub fn build_frost_profiles(
    stations: Vec<Station>,
    zips: &[ZipCentroid],
    daily: &[DailyTemperatureRecord],
) -> NormalizationOutcome {
    let windows = compute_frost_windows(daily);
    let matcher = StationMatcher::new(stations);
    FrostProfileNormalizer::new(&windows).normalize_all(matcher.match_all(zips))
}

/// Writes the CSV, JSON and SQL exports into `dir`.
pub fn export_profiles(profiles: &[ZipFrostProfile], dir: &Path) -> Result<ExportPaths, ExportError> {
    let paths = ExportPaths::in_dir(dir);
    write_profiles_csv(profiles, &paths.csv)?;
    write_profiles_json(profiles, &paths.json)?;
    let sql = profiles_to_sql(profiles, FROST_LOOKUP_TABLE)
        .map_err(|e| ExportError::Json(paths.sql.clone(), e))?;
    write_sql(&sql, &paths.sql)?;
    Ok(paths)
}

fn read_inputs(config: &FrostToolConfig) -> Result<FrostInputs, LoadError> {
    let catalog = load_station_catalog(&read_text_frame(&config.station_normals, COMMA)?)?;
    let zips = load_zip_centroids(&read_text_frame(&config.zip_centroids, config.zip_separator)?)?;
    let daily = load_daily_normals(&read_text_frame(&config.daily_normals, COMMA)?)?;
    Ok(FrostInputs {
        catalog,
        zips,
        daily,
    })
}

pub struct FrostTool {
    config: FrostToolConfig,
}

#[bon]
impl FrostTool {
    pub fn new(config: FrostToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrostToolConfig {
        &self.config
    }

    /// Reads and validates the three input tables on the blocking pool.
    pub async fn load_inputs(&self) -> Result<FrostInputs, FrostToolError> {
        let config = self.config.clone();
        let inputs = tokio::task::spawn_blocking(move || read_inputs(&config)).await??;
        info!(
            "Loaded {} stations, {} ZIP centroids, {} daily normals",
            inputs.catalog.len(),
            inputs.zips.len(),
            inputs.daily.len()
        );
        Ok(inputs)
    }

    /// Writes the exports into the configured output directory, creating it if needed.
    pub async fn export(&self, profiles: Vec<ZipFrostProfile>) -> Result<ExportPaths, FrostToolError> {
        let output_dir = self.config.output_dir.clone();
        ensure_dir_exists(&output_dir)
            .await
            .map_err(|e| FrostToolError::OutputDirCreation(output_dir.clone(), e))?;
        let paths =
            tokio::task::spawn_blocking(move || export_profiles(&profiles, &output_dir)).await??;
        Ok(paths)
    }

    /// Runs the full build: load, compute frost windows, match, normalize, export.
    pub async fn run(&self) -> Result<BuildReport, FrostToolError> {
        let inputs = self.load_inputs().await?;
        let dropped_station_rows = inputs.catalog.dropped_rows;

        let outcome = tokio::task::spawn_blocking(move || {
            build_frost_profiles(inputs.catalog.stations, &inputs.zips, &inputs.daily)
        })
        .await?;

        let profiles = outcome.profiles.len();
        let outputs = self.export(outcome.profiles).await?;
        info!(
            "Built {} ZIP frost profiles into {}",
            profiles,
            self.config.output_dir.display()
        );
        Ok(BuildReport {
            profiles,
            excluded_zipcodes: outcome.excluded,
            dropped_station_rows,
            outputs,
        })
    }

    /// Downloads the station normals into the configured station normals path.
    ///
    /// # Arguments
    ///
    /// * `.output(PathBuf)`: Optional. Destination file. Defaults to the configured station normals path.
    #[builder]
    pub async fn download_station_normals(
        &self,
        #[builder(into)] output: Option<PathBuf>,
    ) -> Result<DownloadSummary, FrostToolError> {
        let output = output.unwrap_or_else(|| self.config.station_normals.clone());
        let downloader = NormalsDownloader::builder()
            .base_url(self.config.normals_listing_url.clone())
            .concurrency(self.config.download_concurrency)
            .build()?;
        Ok(downloader.download_to(&output).await?)
    }
}
