use crate::types::station::Location;
use serde::{Deserialize, Serialize};

/// Geographic centroid of a ZIP Code Tabulation Area.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ZipCentroid {
    /// Five digit ZIP code, left-padded with zeros.
    pub zipcode: String,
    pub location: Location,
}

impl ZipCentroid {
    pub fn new(zipcode: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            zipcode: pad_zipcode(zipcode),
            location: Location::new(latitude, longitude),
        }
    }
}

/// Left-pads a ZIP code with zeros to five digits (`"501"` becomes `"00501"`).
pub fn pad_zipcode(raw: &str) -> String {
    format!("{:0>5}", raw.trim())
}
