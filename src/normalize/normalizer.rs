//! Resolves matched stations into the final per-ZIP frost profiles.
//!
//! Rules, in order:
//! 1. a frost-free window is noted for the station;
//! 2. every station is tagged by average yearly temperature
//!    (`< 50 °F` year-round risk, otherwise infrequent frost), replacing any
//!    frost-free note as the tag that drives sentinel replacement;
//! 3. sentinel frost dates take the tag text;
//! 4. `MM/DD` dates become `"<Month name> <DD>"`;
//! 5. growing days are counted between the two dates, wrapping the year;
//! 6. the tag texts force growing days to 0 and 365 respectively.

use crate::normalize::freeze_dates::{format_freeze_date, growing_days, is_sentinel};
use crate::stations::locate_station::StationMatch;
use crate::types::frost_profile::{FrostCapacity, ZipFrostProfile};
use crate::types::frost_window::FrostWindow;
use crate::types::station::Station;
use crate::types::zip_centroid::ZipCentroid;
use log::{info, warn};
use std::collections::BTreeMap;

/// Average yearly temperature (°F) separating year-round risk from infrequent frost.
pub const YEAR_ROUND_RISK_BELOW_F: f64 = 50.0;
/// Conversion applied to station elevations before rounding to whole feet.
pub const FEET_PER_METER: f64 = 3.28;

/// Frost capacity of a station, from its average yearly temperature alone.
///
/// Frost-free stations are classified the same way, so their sentinel dates
/// still resolve to a tag.
pub fn frost_capacity(avg_yearly_temp_f: f64) -> FrostCapacity {
    if avg_yearly_temp_f < YEAR_ROUND_RISK_BELOW_F {
        FrostCapacity::YearRoundRisk
    } else {
        FrostCapacity::InfrequentFrost
    }
}

/// Replaces a sentinel frost value with the capacity text.
pub fn resolve_sentinel(raw: &str, capacity: FrostCapacity) -> String {
    let raw = raw.trim();
    if is_sentinel(raw) {
        capacity.label().to_string()
    } else {
        raw.to_string()
    }
}

/// Rounds half to even, the way the published table was rounded.
pub fn feet_from_meters(altitude_m: f64) -> i64 {
    (altitude_m * FEET_PER_METER).round_ties_even() as i64
}

/// Rounds a distance to one decimal, half to even.
pub fn round_miles(distance_miles: f64) -> f64 {
    (distance_miles * 10.0).round_ties_even() / 10.0
}

/// Both freeze labels of a station and the growing season between them.
#[derive(Debug, Clone, PartialEq)]
pub struct FrostDates {
    pub capacity: FrostCapacity,
    /// Whether the daily normals put every day above freezing.
    pub frost_free: bool,
    pub last_freeze: String,
    pub first_freeze: String,
    pub growing_days: Option<u32>,
}

impl FrostDates {
    pub fn resolve(station: &Station, window: Option<&FrostWindow>) -> Self {
        let capacity = frost_capacity(station.avg_yearly_temp_f);
        let last_freeze = format_freeze_date(&resolve_sentinel(&station.last_freeze, capacity));
        let first_freeze = format_freeze_date(&resolve_sentinel(&station.first_freeze, capacity));

        let growing_days = match FrostCapacity::from_label(&last_freeze) {
            Some(FrostCapacity::YearRoundRisk) => Some(0),
            Some(FrostCapacity::InfrequentFrost) => Some(365),
            _ => growing_days(&last_freeze, &first_freeze),
        };

        FrostDates {
            capacity,
            frost_free: window.is_some_and(FrostWindow::is_frost_free),
            last_freeze,
            first_freeze,
            growing_days,
        }
    }
}

/// Result of normalizing a batch of ZIP matches.
#[derive(Debug, Clone, Default)]
pub struct NormalizationOutcome {
    /// Complete profiles ordered by ZIP code.
    pub profiles: Vec<ZipFrostProfile>,
    /// ZIP codes left out for an unmatched station or a missing field.
    pub excluded: usize,
}

/// Combines station matches with the per-station frost windows.
pub struct FrostProfileNormalizer<'a> {
    windows: &'a BTreeMap<String, FrostWindow>,
}

impl<'a> FrostProfileNormalizer<'a> {
    pub fn new(windows: &'a BTreeMap<String, FrostWindow>) -> Self {
        Self { windows }
    }

    /// Frost dates for one station.
    pub fn frost_dates(&self, station: &Station) -> FrostDates {
        FrostDates::resolve(station, self.windows.get(&station.id))
    }

    /// Builds the profile of one ZIP code, or `None` if any field stays missing.
    pub fn normalize(&self, zip: &ZipCentroid, found: &StationMatch<'_>) -> Option<ZipFrostProfile> {
        let name = found.station.split_name()?;
        let dates = self.frost_dates(found.station);

        Some(ZipFrostProfile {
            zipcode: zip.zipcode.clone(),
            state_province: name.state_province,
            country: name.country,
            station_name: name.city,
            station_altitude: feet_from_meters(found.station.altitude_m),
            station_distance_miles: round_miles(found.distance_miles),
            last_freeze: dates.last_freeze,
            first_freeze: dates.first_freeze,
            growing_days: dates.growing_days?,
        })
    }

    /// Normalizes every match and orders the profiles by ZIP code.
    pub fn normalize_all<'m>(
        &self,
        matches: impl IntoIterator<Item = (&'m ZipCentroid, Option<StationMatch<'m>>)>,
    ) -> NormalizationOutcome {
        let mut outcome = NormalizationOutcome::default();
        for (zip, found) in matches {
            match found.and_then(|found| self.normalize(zip, &found)) {
                Some(profile) => outcome.profiles.push(profile),
                None => outcome.excluded += 1,
            }
        }
        outcome
            .profiles
            .sort_by(|a, b| a.zipcode.cmp(&b.zipcode));

        if outcome.excluded > 0 {
            warn!(
                "Excluded {} ZIP codes with incomplete frost profiles",
                outcome.excluded
            );
        }
        info!("Normalized {} ZIP frost profiles", outcome.profiles.len());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::locate_station::StationMatcher;
    use crate::types::frost_window::{FreezeEvent, NO_FROST_LABEL};
    use crate::types::station::Location;

    fn station(id: &str, avg_yearly_temp_f: f64, last_freeze: &str, first_freeze: &str) -> Station {
        Station {
            id: id.to_string(),
            name: "SPRINGFIELD, IL US".to_string(),
            location: Location::new(39.8, -89.6),
            altitude_m: 179.5,
            avg_yearly_temp_f,
            last_freeze: last_freeze.to_string(),
            last_freeze_flag: None,
            first_freeze: first_freeze.to_string(),
            first_freeze_flag: None,
        }
    }

    fn seasonal() -> FrostWindow {
        FrostWindow::Seasonal {
            last_spring: FreezeEvent {
                month: 3,
                day: 1,
                min_temp_f: 33.0,
            },
            first_fall: FreezeEvent {
                month: 11,
                day: 30,
                min_temp_f: 33.0,
            },
        }
    }

    #[test]
    fn test_capacity_by_temperature() {
        assert_eq!(frost_capacity(45.0), FrostCapacity::YearRoundRisk);
        assert_eq!(frost_capacity(49.9), FrostCapacity::YearRoundRisk);
        assert_eq!(frost_capacity(50.0), FrostCapacity::InfrequentFrost);
        assert_eq!(frost_capacity(72.3), FrostCapacity::InfrequentFrost);
    }

    #[test]
    fn test_cold_station_with_sentinel_is_year_round_risk() {
        let dates = FrostDates::resolve(&station("COLD", 45.0, "-9999.0", "-9999.0"), None);
        assert_eq!(dates.last_freeze, "year-round risk");
        assert_eq!(dates.first_freeze, "year-round risk");
        assert_eq!(dates.growing_days, Some(0));
    }

    #[test]
    fn test_warm_station_with_sentinel_is_infrequent_frost() {
        let dates = FrostDates::resolve(&station("WARM", 60.0, "-9999.0", "-9999.0"), None);
        assert_eq!(dates.last_freeze, "infrequent frost");
        assert_eq!(dates.growing_days, Some(365));
    }

    #[test]
    fn test_regular_dates_are_formatted_and_counted() {
        let dates = FrostDates::resolve(&station("MID", 52.0, " 04/10", "10/20 "), Some(&seasonal()));
        assert_eq!(dates.capacity, FrostCapacity::InfrequentFrost);
        assert_eq!(dates.last_freeze, "April 10");
        assert_eq!(dates.first_freeze, "October 20");
        assert_eq!(dates.growing_days, Some(193));
    }

    #[test]
    fn test_year_wrap() {
        let dates = FrostDates::resolve(&station("WRAP", 52.0, "12/20", "01/05"), None);
        assert_eq!(dates.last_freeze, "December 20");
        assert_eq!(dates.first_freeze, "January 05");
        assert_eq!(dates.growing_days, Some(16));
    }

    #[test]
    fn test_frost_free_station_is_tagged_by_temperature() {
        let dates = FrostDates::resolve(
            &station("TROPIC", 78.0, "-9999.0", "-9999.0"),
            Some(&FrostWindow::FrostFree),
        );
        assert!(dates.frost_free);
        assert_eq!(dates.capacity, FrostCapacity::InfrequentFrost);
        assert_eq!(dates.last_freeze, "infrequent frost");
        assert_eq!(dates.first_freeze, "infrequent frost");
        assert_eq!(dates.growing_days, Some(365));

        // A cold frost-free station still takes the temperature tag.
        let cold = FrostDates::resolve(
            &station("ODDITY", 40.0, "-9999", "-9999"),
            Some(&FrostWindow::FrostFree),
        );
        assert_eq!(cold.last_freeze, "year-round risk");
        assert_eq!(cold.growing_days, Some(0));
    }

    #[test]
    fn test_no_frost_label_counts_as_unparseable() {
        let dates = FrostDates::resolve(&station("ODD", 78.0, NO_FROST_LABEL, "10/20"), None);
        assert_eq!(dates.growing_days, None);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(feet_from_meters(179.5), 589);
        assert_eq!(feet_from_meters(0.0), 0);
        assert_eq!(feet_from_meters(-2.0), -7);
        assert_eq!(round_miles(12.34), 12.3);
        assert_eq!(round_miles(0.0), 0.0);
        assert_eq!(round_miles(7.96), 8.0);
    }

    #[test]
    fn test_normalize_all_orders_and_excludes() {
        let matcher = StationMatcher::new(vec![
            station("GOOD", 52.0, "04/10", "10/20"),
            Station {
                name: "NO COMMA US".to_string(),
                location: Location::new(30.0, -80.0),
                ..station("BADNAME", 52.0, "04/10", "10/20")
            },
        ]);
        let zips = vec![
            ZipCentroid::new("62702", 39.8, -89.6),
            ZipCentroid::new("32801", 30.0, -80.0),
            ZipCentroid::new("62701", 39.9, -89.7),
        ];
        let windows = BTreeMap::new();
        let outcome = FrostProfileNormalizer::new(&windows).normalize_all(matcher.match_all(&zips));

        assert_eq!(outcome.excluded, 1);
        let zipcodes: Vec<&str> = outcome.profiles.iter().map(|p| p.zipcode.as_str()).collect();
        assert_eq!(zipcodes, vec!["62701", "62702"]);

        let profile = &outcome.profiles[1];
        assert_eq!(profile.station_name, "SPRINGFIELD");
        assert_eq!(profile.state_province, "IL");
        assert_eq!(profile.country, "US");
        assert_eq!(profile.station_altitude, 589);
        assert_eq!(profile.station_distance_miles, 0.0);
        assert_eq!(profile.growing_days, 193);
    }

    #[test]
    fn test_unmatched_zip_is_excluded() {
        let windows = BTreeMap::new();
        let zip = ZipCentroid::new("99999", 0.0, 0.0);
        let outcome = FrostProfileNormalizer::new(&windows).normalize_all(vec![(&zip, None)]);
        assert!(outcome.profiles.is_empty());
        assert_eq!(outcome.excluded, 1);
    }
}
