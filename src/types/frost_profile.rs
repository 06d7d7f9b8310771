use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order of the exported lookup table.
pub const PROFILE_COLUMNS: [&str; 9] = [
    "zipcode",
    "state_province",
    "country",
    "station_name",
    "station_altitude",
    "station_distance_miles",
    "last_freeze",
    "first_freeze",
    "growing_days",
];

/// Overall frost risk of a station, used to replace sentinel frost dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrostCapacity {
    /// Average yearly temperature below 50 °F.
    YearRoundRisk,
    /// Average yearly temperature of 50 °F or more.
    InfrequentFrost,
}

impl FrostCapacity {
    pub fn label(&self) -> &'static str {
        match self {
            FrostCapacity::YearRoundRisk => "year-round risk",
            FrostCapacity::InfrequentFrost => "infrequent frost",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [FrostCapacity::YearRoundRisk, FrostCapacity::InfrequentFrost]
            .into_iter()
            .find(|capacity| capacity.label() == label)
    }
}

impl fmt::Display for FrostCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the final ZIP code lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipFrostProfile {
    pub zipcode: String,
    pub state_province: String,
    pub country: String,
    /// City part of the matched station's display name.
    pub station_name: String,
    /// Station elevation in feet.
    pub station_altitude: i64,
    /// Distance from the ZIP centroid to the station, one decimal.
    pub station_distance_miles: f64,
    pub last_freeze: String,
    pub first_freeze: String,
    /// Days between last and first freeze, 0 through 365.
    pub growing_days: u32,
}
