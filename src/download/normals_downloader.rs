//! Downloads the NCEI 1991-2020 annual/seasonal normals, one CSV per station,
//! and flattens them into the single station normals table the pipeline reads.

use crate::download::error::DownloadError;
use crate::loading::frame_reader::{parse_text_frame, TextTable, COMMA};
use crate::loading::station_catalog::{NULL_SENTINEL, STATION_COLUMNS};
use crate::utils::ensure_dir_exists;
use bon::bon;
use futures_util::{stream, StreamExt};
use log::{debug, info, warn};
use polars::prelude::*;
use reqwest::Client;
use scraper::{Html, Selector};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const NORMALS_LISTING_URL: &str =
    "https://www.ncei.noaa.gov/data/normals-annualseasonal/1991-2020/access/";
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Counts reported after a download run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub files_listed: usize,
    pub files_failed: usize,
    pub rows_written: usize,
}

pub struct NormalsDownloader {
    client: Client,
    base_url: String,
    concurrency: usize,
}

#[bon]
impl NormalsDownloader {
    /// Creates a downloader for the directory listing at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `.base_url(String)`: Optional. Listing URL. Defaults to [`NORMALS_LISTING_URL`].
    /// * `.concurrency(usize)`: Optional. Station files fetched at once. Defaults to `16`.
    /// * `.timeout(Duration)`: Optional. Per-request timeout. Defaults to 60 seconds.
    #[builder]
    pub fn new(
        #[builder(into, default = NORMALS_LISTING_URL.to_string())] base_url: String,
        #[builder(default = DEFAULT_CONCURRENCY)] concurrency: usize,
        #[builder(default = Duration::from_secs(60))] timeout: Duration,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(concat!("frost-normals/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(DownloadError::ClientBuild)?;
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{}/", base_url)
        };
        Ok(Self {
            client,
            base_url,
            concurrency: concurrency.max(1),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::NetworkRequest(url.to_string(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    DownloadError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    DownloadError::NetworkRequest(url.to_string(), e)
                });
            }
        };
        response
            .text()
            .await
            .map_err(|e| DownloadError::NetworkRequest(url.to_string(), e))
    }

    /// Lists the station CSV file names linked from the directory page.
    pub async fn list_station_files(&self) -> Result<Vec<String>, DownloadError> {
        let html = self.get_text(&self.base_url).await?;
        let links = parse_csv_links(&html)?;
        info!("Found {} station files at {}", links.len(), self.base_url);
        Ok(links)
    }

    /// Downloads one station file and projects it onto the station normals columns.
    pub async fn fetch_station_rows(&self, file_name: &str) -> Result<Vec<Vec<String>>, DownloadError> {
        let url = format!("{}{}", self.base_url, file_name);
        debug!("Downloading {}", url);
        let body = self.get_text(&url).await?;
        project_station_rows(body, file_name)
    }

    /// Downloads every listed station file and writes the combined table to `output`.
    ///
    /// Files that fail to download or parse are logged and skipped.
    pub async fn download_to(&self, output: &Path) -> Result<DownloadSummary, DownloadError> {
        let files = self.list_station_files().await?;

        let results: Vec<(String, Result<Vec<Vec<String>>, DownloadError>)> =
            stream::iter(files.iter().cloned())
                .map(|file_name| async move {
                    let rows = self.fetch_station_rows(&file_name).await;
                    (file_name, rows)
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut rows = Vec::new();
        let mut files_failed = 0;
        for (file_name, result) in results {
            match result {
                Ok(mut station_rows) => rows.append(&mut station_rows),
                Err(e) => {
                    warn!("Skipping station file {}: {}", file_name, e);
                    files_failed += 1;
                }
            }
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir_exists(parent)
                .await
                .map_err(|e| DownloadError::FileCreation(parent.to_path_buf(), e))?;
        }
        let rows_written = rows.len();
        let output_path: PathBuf = output.to_path_buf();
        tokio::task::spawn_blocking(move || write_station_rows(&rows, &output_path)).await??;

        info!(
            "Wrote {} station rows from {} files to {} ({} failed)",
            rows_written,
            files.len() - files_failed,
            output.display(),
            files_failed
        );
        Ok(DownloadSummary {
            files_listed: files.len(),
            files_failed,
            rows_written,
        })
    }
}

/// Extracts every `href` ending in `.csv` from a directory listing page.
pub fn parse_csv_links(html: &str) -> Result<Vec<String>, DownloadError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a").map_err(|e| DownloadError::Selector(format!("{:?}", e)))?;
    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| href.ends_with(".csv"))
        .map(str::to_string)
        .collect())
}

/// Keeps the station normals columns of one station file, in table order.
///
/// Columns the file does not publish are filled with the `null` sentinel.
pub fn project_station_rows(body: String, file_name: &str) -> Result<Vec<Vec<String>>, DownloadError> {
    let frame = parse_text_frame(body.into_bytes(), COMMA, "station file")
        .map_err(|e| DownloadError::StationFile(file_name.to_string(), e))?;
    let table = TextTable::new("station file", &frame);
    let columns: Vec<Option<&StringChunked>> = STATION_COLUMNS
        .iter()
        .map(|name| table.column(name).ok())
        .collect();

    Ok((0..table.height())
        .map(|idx| {
            columns
                .iter()
                .map(|column| match column {
                    Some(values) => values.get(idx).unwrap_or_default().to_string(),
                    None => NULL_SENTINEL.to_string(),
                })
                .collect()
        })
        .collect())
}

fn station_rows_to_frame(rows: &[Vec<String>]) -> PolarsResult<DataFrame> {
    let columns = STATION_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<&str> = rows.iter().map(|row| row[i].as_str()).collect();
            Column::new((*name).into(), values)
        })
        .collect::<Vec<_>>();
    DataFrame::new(columns)
}

fn write_station_rows(rows: &[Vec<String>], path: &Path) -> Result<(), DownloadError> {
    let mut frame = station_rows_to_frame(rows).map_err(DownloadError::FrameBuild)?;
    let mut file =
        File::create(path).map_err(|e| DownloadError::FileCreation(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| DownloadError::CsvWrite(path.to_path_buf(), e))
}
