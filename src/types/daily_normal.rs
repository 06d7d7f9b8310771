use serde::{Deserialize, Serialize};

/// One calendar day of the daily minimum-temperature normals for a station.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyTemperatureRecord {
    pub station_id: String,
    /// Month of the year, 1-12.
    pub month: u32,
    /// Day of the month, 1-31.
    pub day: u32,
    /// Normal daily minimum temperature in °F.
    pub min_temp_f: f64,
}

impl DailyTemperatureRecord {
    pub fn new(station_id: &str, month: u32, day: u32, min_temp_f: f64) -> Self {
        Self {
            station_id: station_id.to_string(),
            month,
            day,
            min_temp_f,
        }
    }
}
