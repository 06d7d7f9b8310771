//! Turns exported records into `INSERT` statements.

use crate::export::error::ExportError;
use crate::export::json_export::read_json_records;
use crate::types::frost_profile::ZipFrostProfile;
use log::info;
use serde_json::{Map, Value};
use std::path::Path;

/// Name of the lookup table the statements insert into.
pub const FROST_LOOKUP_TABLE: &str = "zip_frost_lookup";

/// Text of a single value, as a JSON reader would print it.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        // Floats keep their trailing `.0`.
        other => other.to_string(),
    }
}

/// Quotes a value for the statement, escaping embedded single quotes as `\'`.
pub fn sql_literal(value: &Value) -> String {
    format!("'{}'", value_text(value).replace('\'', "\\'"))
}

pub fn record_to_insert(record: &Map<String, Value>, table: &str) -> String {
    let columns = record.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
    let values = record.values().map(sql_literal).collect::<Vec<_>>().join(", ");
    format!("INSERT INTO {} ({}) VALUES ({});", table, columns, values)
}

/// One statement per record, newline separated.
pub fn records_to_sql(records: &[Map<String, Value>], table: &str) -> String {
    records
        .iter()
        .map(|record| record_to_insert(record, table))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn profiles_to_sql(profiles: &[ZipFrostProfile], table: &str) -> Result<String, serde_json::Error> {
    let records: Vec<Map<String, Value>> = profiles
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect();
    Ok(records_to_sql(&records, table))
}

pub fn write_sql(sql: &str, path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, sql).map_err(|e| ExportError::FileWrite(path.to_path_buf(), e))?;
    info!("Wrote {} insert statements to {}", sql.lines().count(), path.display());
    Ok(())
}

/// Converts a JSON records export into insert statements written to `sql_path`.
///
/// Returns the number of statements written.
pub fn convert_json_to_sql(json_path: &Path, sql_path: &Path, table: &str) -> Result<usize, ExportError> {
    let records = read_json_records(json_path)?;
    write_sql(&records_to_sql(&records, table), sql_path)?;
    Ok(records.len())
}
