//! Loads the daily minimum-temperature normals (`dly-temp-normal.csv`).

use crate::loading::error::LoadError;
use crate::loading::frame_reader::{cell, TextTable};
use crate::types::daily_normal::DailyTemperatureRecord;
use log::{info, warn};
use polars::prelude::DataFrame;
use std::collections::HashSet;

pub const COL_GHCN_ID: &str = "GHCN_ID";
pub const COL_MONTH: &str = "month";
pub const COL_DAY: &str = "day";
pub const COL_MIN_TEMP: &str = "DLY-TMIN-NORMAL";

/// Reads daily minimum-temperature records, dropping exact duplicates.
///
/// Rows with an unparseable month, day or temperature are skipped and counted.
pub fn load_daily_normals(frame: &DataFrame) -> Result<Vec<DailyTemperatureRecord>, LoadError> {
    let table = TextTable::new("daily normals", frame);
    let station_ids = table.column(COL_GHCN_ID)?;
    let months = table.column(COL_MONTH)?;
    let days = table.column(COL_DAY)?;
    let min_temps = table.column(COL_MIN_TEMP)?;

    let mut skipped = 0usize;
    let mut duplicates = 0usize;
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        let station_id = cell(station_ids, idx).filter(|id| !id.is_empty());
        let month = cell(months, idx)
            .and_then(|m| m.parse::<u32>().ok())
            .filter(|m| (1..=12).contains(m));
        let day = cell(days, idx)
            .and_then(|d| d.parse::<u32>().ok())
            .filter(|d| (1..=31).contains(d));
        let min_temp = cell(min_temps, idx)
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|t| t.is_finite());

        let (Some(station_id), Some(month), Some(day), Some(min_temp)) =
            (station_id, month, day, min_temp)
        else {
            skipped += 1;
            continue;
        };
        if !seen.insert((station_id, month, day, min_temp.to_bits())) {
            duplicates += 1;
            continue;
        }
        records.push(DailyTemperatureRecord::new(station_id, month, day, min_temp));
    }

    if skipped > 0 {
        warn!("Skipped {} daily normal rows with missing values", skipped);
    }
    info!(
        "Loaded {} daily normal records ({} duplicates dropped)",
        records.len(),
        duplicates
    );
    Ok(records)
}
