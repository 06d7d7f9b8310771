//! Loads ZIP code centroids from the Census Gazetteer ZCTA file.

use crate::loading::error::LoadError;
use crate::loading::frame_reader::{cell, TextTable};
use crate::types::zip_centroid::ZipCentroid;
use log::{info, warn};
use polars::prelude::{DataFrame, StringChunked};

pub const COL_GEOID: &str = "GEOID";
pub const COL_INTPTLAT: &str = "INTPTLAT";
// The published header carries trailing whitespace; columns are matched trimmed.
pub const COL_INTPTLONG: &str = "INTPTLONG";

fn parse_coordinate(column: &StringChunked, idx: usize) -> Option<f64> {
    cell(column, idx)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Reads every ZIP centroid from a string-typed Gazetteer frame.
///
/// Rows with a blank ZIP code or unparseable coordinates are skipped and counted.
pub fn load_zip_centroids(frame: &DataFrame) -> Result<Vec<ZipCentroid>, LoadError> {
    let table = TextTable::new("zip centroids", frame);
    let zipcodes = table.column(COL_GEOID)?;
    let latitudes = table.column(COL_INTPTLAT)?;
    let longitudes = table.column(COL_INTPTLONG)?;

    let mut skipped = 0usize;
    let mut centroids = Vec::with_capacity(table.height());
    for idx in 0..table.height() {
        let zipcode = cell(zipcodes, idx).filter(|zip| !zip.is_empty());
        let latitude = parse_coordinate(latitudes, idx);
        let longitude = parse_coordinate(longitudes, idx);
        match (zipcode, latitude, longitude) {
            (Some(zipcode), Some(latitude), Some(longitude)) => {
                centroids.push(ZipCentroid::new(zipcode, latitude, longitude))
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} ZIP centroid rows with missing values", skipped);
    }
    info!("Loaded {} ZIP centroids", centroids.len());
    Ok(centroids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::frame_reader::{parse_text_frame, TAB};
    use crate::types::station::Location;

    #[test]
    fn test_loads_gazetteer_rows() {
        let body = "GEOID\tALAND\tAWATER\tALAND_SQMI\tAWATER_SQMI\tINTPTLAT\tINTPTLONG                 \n\
                    601\t166836392\t798613\t64.416\t0.308\t18.180555\t-66.749961\n\
                    01001\t29635630\t2229577\t11.442\t0.861\t42.062368\t-72.625754\n\
                    01002\t142559517\t2254816\t55.042\t0.87\t\t-72.458536\n";
        let frame = parse_text_frame(body.as_bytes().to_vec(), TAB, "zip centroids").unwrap();
        let zips = load_zip_centroids(&frame).unwrap();

        assert_eq!(zips.len(), 2);
        assert_eq!(zips[0].zipcode, "00601");
        assert_eq!(zips[0].location, Location::new(18.180555, -66.749961));
        assert_eq!(zips[1].zipcode, "01001");
    }
}
