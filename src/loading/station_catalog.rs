//! Turns raw annual/seasonal normals rows into validated [`Station`] records.

use crate::loading::error::LoadError;
use crate::loading::frame_reader::{cell, TextTable};
use crate::types::station::{Location, MeasurementFlag, Station};
use log::{debug, info, warn};
use polars::prelude::{DataFrame, StringChunked};
use std::collections::HashSet;

/// Placeholder written upstream for columns a station file did not publish.
pub const NULL_SENTINEL: &str = "null";

pub const COL_STATION: &str = "STATION";
pub const COL_LATITUDE: &str = "LATITUDE";
pub const COL_LONGITUDE: &str = "LONGITUDE";
pub const COL_ELEVATION: &str = "ELEVATION";
pub const COL_NAME: &str = "NAME";
pub const COL_LAST_FREEZE_FLAG: &str = "meas_flag_ANN-TMIN-PRBLST-T32FP30";
pub const COL_LAST_FREEZE: &str = "ANN-TMIN-PRBLST-T32FP30"; // 30% probability of the last spring frost
pub const COL_FIRST_FREEZE_FLAG: &str = "meas_flag_ANN-TMIN-PRBFST-T32FP30";
pub const COL_FIRST_FREEZE: &str = "ANN-TMIN-PRBFST-T32FP30"; // 30% probability of the first fall frost
pub const COL_AVG_YEARLY_TEMP: &str = "ANN-TAVG-NORMAL";

/// Columns of the station normals table, in file order.
pub const STATION_COLUMNS: [&str; 10] = [
    COL_STATION,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_ELEVATION,
    COL_NAME,
    COL_LAST_FREEZE_FLAG,
    COL_LAST_FREEZE,
    COL_FIRST_FREEZE_FLAG,
    COL_FIRST_FREEZE,
    COL_AVG_YEARLY_TEMP,
];

/// The validated station table.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    pub stations: Vec<Station>,
    /// Rows excluded for null sentinels, blanks, unparseable values or duplicate ids.
    pub dropped_rows: usize,
}

impl StationCatalog {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

struct StationColumns<'a> {
    id: &'a StringChunked,
    latitude: &'a StringChunked,
    longitude: &'a StringChunked,
    elevation: &'a StringChunked,
    name: &'a StringChunked,
    last_freeze_flag: &'a StringChunked,
    last_freeze: &'a StringChunked,
    first_freeze_flag: &'a StringChunked,
    first_freeze: &'a StringChunked,
    avg_yearly_temp: &'a StringChunked,
}

impl<'a> StationColumns<'a> {
    fn resolve(table: &TextTable<'a>) -> Result<Self, LoadError> {
        Ok(Self {
            id: table.column(COL_STATION)?,
            latitude: table.column(COL_LATITUDE)?,
            longitude: table.column(COL_LONGITUDE)?,
            elevation: table.column(COL_ELEVATION)?,
            name: table.column(COL_NAME)?,
            last_freeze_flag: table.column(COL_LAST_FREEZE_FLAG)?,
            last_freeze: table.column(COL_LAST_FREEZE)?,
            first_freeze_flag: table.column(COL_FIRST_FREEZE_FLAG)?,
            first_freeze: table.column(COL_FIRST_FREEZE)?,
            avg_yearly_temp: table.column(COL_AVG_YEARLY_TEMP)?,
        })
    }

    fn all(&self) -> [&'a StringChunked; 10] {
        [
            self.id,
            self.latitude,
            self.longitude,
            self.elevation,
            self.name,
            self.last_freeze_flag,
            self.last_freeze,
            self.first_freeze_flag,
            self.first_freeze,
            self.avg_yearly_temp,
        ]
    }

    fn parse_row(&self, idx: usize) -> Option<Station> {
        if self
            .all()
            .iter()
            .any(|column| cell(column, idx) == Some(NULL_SENTINEL))
        {
            return None;
        }

        let latitude = required_float(self.latitude, idx)?;
        let longitude = required_float(self.longitude, idx)?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }

        Some(Station {
            id: required_text(self.id, idx)?.to_string(),
            name: required_text(self.name, idx)?.to_string(),
            location: Location::new(latitude, longitude),
            altitude_m: required_float(self.elevation, idx)?,
            avg_yearly_temp_f: required_float(self.avg_yearly_temp, idx)?,
            last_freeze: required_text(self.last_freeze, idx)?.to_string(),
            last_freeze_flag: cell(self.last_freeze_flag, idx).and_then(MeasurementFlag::from_code),
            first_freeze: required_text(self.first_freeze, idx)?.to_string(),
            first_freeze_flag: cell(self.first_freeze_flag, idx)
                .and_then(MeasurementFlag::from_code),
        })
    }
}

fn required_text(column: &StringChunked, idx: usize) -> Option<&str> {
    cell(column, idx).filter(|value| !value.is_empty())
}

fn required_float(column: &StringChunked, idx: usize) -> Option<f64> {
    required_text(column, idx)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Builds the station catalog from a string-typed station normals frame.
///
/// # Errors
///
/// Returns [`LoadError::MissingColumn`] if any of [`STATION_COLUMNS`] is absent.
/// Bad rows never fail the load; they are dropped and counted.
pub fn load_station_catalog(frame: &DataFrame) -> Result<StationCatalog, LoadError> {
    let table = TextTable::new("station normals", frame);
    let columns = StationColumns::resolve(&table)?;

    let mut seen_ids = HashSet::new();
    let mut catalog = StationCatalog::default();
    for idx in 0..table.height() {
        let Some(station) = columns.parse_row(idx) else {
            debug!("Dropping incomplete station row {}", idx);
            catalog.dropped_rows += 1;
            continue;
        };
        if !seen_ids.insert(station.id.clone()) {
            warn!("Duplicate station id {} at row {}, keeping the first", station.id, idx);
            catalog.dropped_rows += 1;
            continue;
        }
        catalog.stations.push(station);
    }

    info!(
        "Loaded {} stations ({} rows dropped)",
        catalog.len(),
        catalog.dropped_rows
    );
    Ok(catalog)
}
