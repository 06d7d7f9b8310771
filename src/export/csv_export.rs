//! Row-oriented export of the lookup table through a Polars frame.

use crate::export::error::ExportError;
use crate::loading::frame_reader::{cell, read_text_frame, TextTable, COMMA};
use crate::types::frost_profile::ZipFrostProfile;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Builds a DataFrame with one column per profile field, in export order.
pub fn profiles_to_frame(profiles: &[ZipFrostProfile]) -> PolarsResult<DataFrame> {
    polars::df!(
        "zipcode" => profiles.iter().map(|p| p.zipcode.as_str()).collect::<Vec<_>>(),
        "state_province" => profiles.iter().map(|p| p.state_province.as_str()).collect::<Vec<_>>(),
        "country" => profiles.iter().map(|p| p.country.as_str()).collect::<Vec<_>>(),
        "station_name" => profiles.iter().map(|p| p.station_name.as_str()).collect::<Vec<_>>(),
        "station_altitude" => profiles.iter().map(|p| p.station_altitude).collect::<Vec<i64>>(),
        "station_distance_miles" => profiles.iter().map(|p| p.station_distance_miles).collect::<Vec<f64>>(),
        "last_freeze" => profiles.iter().map(|p| p.last_freeze.as_str()).collect::<Vec<_>>(),
        "first_freeze" => profiles.iter().map(|p| p.first_freeze.as_str()).collect::<Vec<_>>(),
        "growing_days" => profiles.iter().map(|p| i64::from(p.growing_days)).collect::<Vec<i64>>()
    )
}

/// Writes the profiles as CSV with a header row.
pub fn write_profiles_csv(profiles: &[ZipFrostProfile], path: &Path) -> Result<(), ExportError> {
    let mut frame = profiles_to_frame(profiles).map_err(ExportError::FrameBuild)?;
    let mut file =
        File::create(path).map_err(|e| ExportError::FileCreation(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| ExportError::CsvWrite(path.to_path_buf(), e))?;
    info!("Wrote {} profiles to {}", profiles.len(), path.display());
    Ok(())
}

/// Text cells are taken verbatim so that exported values read back unchanged.
fn text_cell(column: &StringChunked, idx: usize) -> String {
    column.get(idx).unwrap_or_default().to_string()
}

fn parse_cell<T: FromStr>(
    column: &StringChunked,
    name: &str,
    idx: usize,
) -> Result<T, ExportError> {
    let raw = cell(column, idx).unwrap_or_default();
    raw.parse::<T>().map_err(|_| ExportError::InvalidValue {
        row: idx,
        column: name.to_string(),
        value: raw.to_string(),
    })
}

/// Reads profiles back from a string-typed frame of an exported CSV.
pub fn profiles_from_frame(frame: &DataFrame) -> Result<Vec<ZipFrostProfile>, ExportError> {
    let table = TextTable::new("frost profiles", frame);
    let zipcode = table.column("zipcode")?;
    let state_province = table.column("state_province")?;
    let country = table.column("country")?;
    let station_name = table.column("station_name")?;
    let station_altitude = table.column("station_altitude")?;
    let station_distance_miles = table.column("station_distance_miles")?;
    let last_freeze = table.column("last_freeze")?;
    let first_freeze = table.column("first_freeze")?;
    let growing_days = table.column("growing_days")?;

    (0..table.height())
        .map(|idx| {
            Ok(ZipFrostProfile {
                zipcode: text_cell(zipcode, idx),
                state_province: text_cell(state_province, idx),
                country: text_cell(country, idx),
                station_name: text_cell(station_name, idx),
                station_altitude: parse_cell(station_altitude, "station_altitude", idx)?,
                station_distance_miles: parse_cell(
                    station_distance_miles,
                    "station_distance_miles",
                    idx,
                )?,
                last_freeze: text_cell(last_freeze, idx),
                first_freeze: text_cell(first_freeze, idx),
                growing_days: parse_cell(growing_days, "growing_days", idx)?,
            })
        })
        .collect()
}

/// Reads an exported CSV back into profiles.
pub fn read_profiles_csv(path: &Path) -> Result<Vec<ZipFrostProfile>, ExportError> {
    let frame = read_text_frame(path, COMMA)?;
    profiles_from_frame(&frame)
}
