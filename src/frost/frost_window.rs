//! Derives each station's frost window from its daily minimum-temperature normals.
//!
//! The first day of the year with a normal minimum above freezing ends the spring
//! frost risk, and the last such day precedes the first fall frost.

use crate::types::daily_normal::DailyTemperatureRecord;
use crate::types::frost_window::{FreezeEvent, FrostWindow, FREEZING_POINT_F};
use log::debug;
use std::collections::BTreeMap;

impl From<&DailyTemperatureRecord> for FreezeEvent {
    fn from(record: &DailyTemperatureRecord) -> Self {
        FreezeEvent {
            month: record.month,
            day: record.day,
            min_temp_f: record.min_temp_f,
        }
    }
}

/// Computes the frost window of a single station.
///
/// `records` may be in any order; they are scanned by calendar day.
pub fn compute_frost_window(records: &[DailyTemperatureRecord]) -> FrostWindow {
    let mut ordered: Vec<&DailyTemperatureRecord> = records.iter().collect();
    ordered.sort_by_key(|record| (record.month, record.day));

    let mut warm_days = ordered
        .into_iter()
        .filter(|record| record.min_temp_f > FREEZING_POINT_F);
    let Some(first_warm) = warm_days.next() else {
        return FrostWindow::Undefined;
    };
    let last_warm = warm_days.last().unwrap_or(first_warm);

    FrostWindow::from_events(first_warm.into(), last_warm.into())
}

/// Groups daily records by station identifier.
pub fn partition_by_station(
    records: &[DailyTemperatureRecord],
) -> BTreeMap<&str, Vec<DailyTemperatureRecord>> {
    let mut partitions: BTreeMap<&str, Vec<DailyTemperatureRecord>> = BTreeMap::new();
    for record in records {
        partitions
            .entry(record.station_id.as_str())
            .or_default()
            .push(record.clone());
    }
    partitions
}

/// Computes the frost window of every station present in `records`.
pub fn compute_frost_windows(records: &[DailyTemperatureRecord]) -> BTreeMap<String, FrostWindow> {
    let windows: BTreeMap<String, FrostWindow> = partition_by_station(records)
        .into_iter()
        .map(|(station_id, station_records)| {
            (station_id.to_string(), compute_frost_window(&station_records))
        })
        .collect();

    let frost_free = windows.values().filter(|w| w.is_frost_free()).count();
    let undefined = windows
        .values()
        .filter(|w| matches!(w, FrostWindow::Undefined))
        .count();
    debug!(
        "Computed {} frost windows ({} frost-free, {} without a warm day)",
        windows.len(),
        frost_free,
        undefined
    );
    windows
}
