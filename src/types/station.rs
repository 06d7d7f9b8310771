//! Defines the data structures representing NOAA climate-normals stations,
//! including location, frost-date measurements and the display name split.
//! Also includes implementations necessary for spatial indexing using the
//! `rstar` crate.

use regex_lite::Regex;
use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static STATION_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?),\s(.*?)\s(\w\w)$").expect("station name pattern compiles")
});

// --- Data Structures ---

/// A single station row from the 1991-2020 annual/seasonal normals.
///
/// Frost values are kept as the trimmed raw text published by NOAA: either a
/// `MM/DD` date or the `-9999` "not computable" sentinel. They are resolved
/// into labels by the normalizer, not here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// The GHCN station identifier (e.g., "USW00014739").
    pub id: String,
    /// Display name in the form "<city>, <state/province> <CC>".
    pub name: String,
    /// Geographical location of the station.
    pub location: Location,
    /// Elevation above sea level in meters.
    pub altitude_m: f64,
    /// Average temperature over the whole year, in °F.
    pub avg_yearly_temp_f: f64,
    /// Date with a 30% probability of the last spring frost, or the sentinel.
    pub last_freeze: String,
    pub last_freeze_flag: Option<MeasurementFlag>,
    /// Date with a 30% probability of the first fall frost, or the sentinel.
    pub first_freeze: String,
    pub first_freeze_flag: Option<MeasurementFlag>,
}

impl Station {
    /// Splits the display name into city, state/province and country.
    ///
    /// Returns `None` when the name does not follow the "<city>, <state> <CC>" pattern.
    pub fn split_name(&self) -> Option<StationName> {
        StationName::parse(&self.name)
    }
}

/// Represents a point on the map in decimal degrees.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The pieces of a station display name such as `"Springfield, IL US"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationName {
    pub city: String,
    pub state_province: String,
    /// Two-letter country code, the final token of the name.
    pub country: String,
}

impl StationName {
    /// Splits a display name; each part is trimmed of edge whitespace.
    pub fn parse(display_name: &str) -> Option<Self> {
        let captures = STATION_NAME_PATTERN.captures(display_name)?;
        Some(Self {
            city: captures[1].trim().to_string(),
            state_province: captures[2].trim().to_string(),
            country: captures[3].to_string(),
        })
    }
}

/// Measurement flags attached to NOAA normals values.
///
/// See the "Measurement Flags" table in the NCEI by-variable normals readme.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementFlag {
    /// `M`: missing.
    Missing,
    /// `V`: year-round risk of frost-freeze, too cold to compute.
    YearRoundRisk,
    /// `W`: reserved, not used.
    Unused,
    /// `X`: nonzero value has rounded to zero.
    RoundedToZero,
    /// `Y`: insufficient values to perform the computation.
    InsufficientValues,
    /// `Z`: computed value created a logical inconsistency with other values.
    Inconsistent,
    /// Any other letter, kept verbatim.
    Other(char),
}

impl MeasurementFlag {
    /// Parses a flag cell. Blank cells carry no flag.
    pub fn from_code(code: &str) -> Option<Self> {
        let letter = code.trim().chars().next()?;
        Some(match letter {
            'M' => MeasurementFlag::Missing,
            'V' => MeasurementFlag::YearRoundRisk,
            'W' => MeasurementFlag::Unused,
            'X' => MeasurementFlag::RoundedToZero,
            'Y' => MeasurementFlag::InsufficientValues,
            'Z' => MeasurementFlag::Inconsistent,
            other => MeasurementFlag::Other(other),
        })
    }

    pub fn code(&self) -> char {
        match self {
            MeasurementFlag::Missing => 'M',
            MeasurementFlag::YearRoundRisk => 'V',
            MeasurementFlag::Unused => 'W',
            MeasurementFlag::RoundedToZero => 'X',
            MeasurementFlag::InsufficientValues => 'Y',
            MeasurementFlag::Inconsistent => 'Z',
            MeasurementFlag::Other(letter) => *letter,
        }
    }
}

impl fmt::Display for MeasurementFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// --- R-Tree Implementations ---

/// Implementation required by `rstar` to treat a `Station` as an object within an R-Tree.
impl RTreeObject for Station {
    /// The envelope type is an Axis-Aligned Bounding Box (AABB) in 2D space (latitude, longitude).
    type Envelope = AABB<[f64; 2]>;

    /// A station is a point, so its envelope is a degenerate AABB around (latitude, longitude).
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.latitude, self.location.longitude])
    }
}

/// Implementation required by `rstar` to calculate distances between stations and query points.
impl PointDistance for Station {
    /// Squared Euclidean distance over raw degrees: `(station_lat - query_lat)^2 + (station_lon - query_lon)^2`.
    ///
    /// Latitude and longitude are treated as Cartesian coordinates. This is the
    /// metric nearest-station matching is defined on, not an approximation of it.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        // point[0] = query latitude, point[1] = query longitude
        let dx = self.location.latitude - point[0];
        let dy = self.location.longitude - point[1];
        dx * dx + dy * dy
    }
}
