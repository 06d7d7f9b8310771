use crate::types::station::{Location, Station};
use crate::types::zip_centroid::ZipCentroid;
use log::{info, warn};
use ordered_float::OrderedFloat;
use rstar::RTree;

/// Miles per degree of latitude.
pub const MILES_PER_DEGREE_LAT: f64 = 69.0;
/// Miles per degree of longitude at mid-U.S. latitudes.
pub const MILES_PER_DEGREE_LON: f64 = 54.6;

/// Flat-earth distance in miles between a ZIP centroid and a station.
///
/// `sqrt((Δlat * 69)^2 + (Δlon * 54.6)^2)`. This is the published lookup
/// table's definition of distance and is kept as is rather than replaced with
/// a great-circle formula.
pub fn distance_miles(zip: Location, station: Location) -> f64 {
    let lat_miles = (zip.latitude - station.latitude) * MILES_PER_DEGREE_LAT;
    let lon_miles = (zip.longitude - station.longitude) * MILES_PER_DEGREE_LON;
    (lat_miles * lat_miles + lon_miles * lon_miles).sqrt()
}

/// The station closest to a ZIP centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationMatch<'a> {
    pub station: &'a Station,
    pub distance_miles: f64,
}

/// Nearest-station lookup over an R-tree of the station catalog.
#[derive(Debug, Clone)]
pub struct StationMatcher {
    rtree: RTree<Station>,
}

impl StationMatcher {
    pub fn new(stations: Vec<Station>) -> Self {
        let rtree = RTree::bulk_load(stations);
        info!("Indexed {} stations for nearest-station matching", rtree.size());
        StationMatcher { rtree }
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// Finds the station nearest to `location` by Euclidean distance over raw degrees.
    ///
    /// Stations at exactly the same distance are resolved to the lowest station id.
    /// Returns `None` only for an empty catalog.
    pub fn nearest(&self, location: Location) -> Option<StationMatch<'_>> {
        let query_point_rtree = [location.latitude, location.longitude];
        let mut candidates = self
            .rtree
            .nearest_neighbor_iter_with_distance_2(&query_point_rtree)
            .peekable();
        let nearest_distance_2 = OrderedFloat(candidates.peek()?.1);

        // The iterator yields in ascending distance, so ties are consecutive.
        let (station, _) = candidates
            .take_while(|(_, distance_2)| OrderedFloat(*distance_2) == nearest_distance_2)
            .min_by(|(a, _), (b, _)| a.id.cmp(&b.id))?;

        Some(StationMatch {
            station,
            distance_miles: distance_miles(location, station.location),
        })
    }

    /// Matches every ZIP centroid, preserving input order.
    pub fn match_all<'a>(
        &'a self,
        zips: &'a [ZipCentroid],
    ) -> Vec<(&'a ZipCentroid, Option<StationMatch<'a>>)> {
        if self.is_empty() && !zips.is_empty() {
            warn!("Station catalog is empty; {} ZIP codes cannot be matched", zips.len());
        }
        zips.iter()
            .map(|zip| (zip, self.nearest(zip.location)))
            .collect()
    }
}
