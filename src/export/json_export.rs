//! Record-oriented JSON export: an array with one object per ZIP code.

use crate::export::error::ExportError;
use crate::types::frost_profile::ZipFrostProfile;
use log::info;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn write_profiles_json(profiles: &[ZipFrostProfile], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::FileCreation(path.to_path_buf(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, profiles)
        .map_err(|e| ExportError::Json(path.to_path_buf(), e))?;
    writer
        .flush()
        .map_err(|e| ExportError::FileWrite(path.to_path_buf(), e))?;
    info!("Wrote {} profiles to {}", profiles.len(), path.display());
    Ok(())
}

pub fn read_profiles_json(path: &Path) -> Result<Vec<ZipFrostProfile>, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::FileOpen(path.to_path_buf(), e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ExportError::Json(path.to_path_buf(), e))
}

/// Reads any JSON array of flat records, keeping each record's key order.
pub fn read_json_records(path: &Path) -> Result<Vec<Map<String, Value>>, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::FileOpen(path.to_path_buf(), e))?;
    let document: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ExportError::Json(path.to_path_buf(), e))?;
    let Value::Array(items) = document else {
        return Err(ExportError::NotRecords(path.to_path_buf()));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(ExportError::NotRecords(path.to_path_buf())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(zipcode: &str, last_freeze: &str, growing_days: u32) -> ZipFrostProfile {
        ZipFrostProfile {
            zipcode: zipcode.to_string(),
            state_province: "AK".to_string(),
            country: "US".to_string(),
            station_name: "BARROW".to_string(),
            station_altitude: 36,
            station_distance_miles: 3.5,
            last_freeze: last_freeze.to_string(),
            first_freeze: last_freeze.to_string(),
            growing_days,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frost_tool_dict.json");
        let profiles = vec![
            profile("99723", "year-round risk", 0),
            profile("99791", "June 28", 0),
        ];

        write_profiles_json(&profiles, &path).unwrap();
        assert_eq!(read_profiles_json(&path).unwrap(), profiles);
    }

    #[test]
    fn test_records_keep_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        write_profiles_json(&[profile("99723", "year-round risk", 0)], &path).unwrap();

        let records = read_json_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, crate::types::frost_profile::PROFILE_COLUMNS);
        assert_eq!(records[0]["station_distance_miles"], serde_json::json!(3.5));
    }

    #[test]
    fn test_non_array_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("object.json");
        std::fs::write(&path, r#"{"zipcode": "99723"}"#).unwrap();
        assert!(matches!(
            read_json_records(&path),
            Err(ExportError::NotRecords(_))
        ));
    }
}
