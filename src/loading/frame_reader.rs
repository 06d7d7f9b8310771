//! Reads delimited text tables into Polars frames with every column kept as a string.
//!
//! Typing is left to the individual loaders so that sentinel text such as
//! `null` or `-9999` survives until the rules that interpret it.

use crate::loading::error::LoadError;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

pub const COMMA: u8 = b',';
pub const TAB: u8 = b'\t';

fn text_read_options(separator: u8) -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        // Zero rows of inference reads every column as String.
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| options.with_separator(separator))
}

/// Reads the file at `path` into a string-typed DataFrame.
pub fn read_text_frame(path: &Path, separator: u8) -> Result<DataFrame, LoadError> {
    text_read_options(separator)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| LoadError::Read(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| LoadError::Read(path.to_path_buf(), e))
}

/// Parses an in-memory table (e.g. a downloaded CSV body) into a string-typed DataFrame.
pub fn parse_text_frame(bytes: Vec<u8>, separator: u8, table: &str) -> Result<DataFrame, LoadError> {
    text_read_options(separator)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| LoadError::Parse {
            table: table.to_string(),
            source,
        })
}

/// Named view over a string-typed frame that resolves columns by trimmed header name.
pub struct TextTable<'a> {
    table: &'static str,
    frame: &'a DataFrame,
}

impl<'a> TextTable<'a> {
    pub fn new(table: &'static str, frame: &'a DataFrame) -> Self {
        Self { table, frame }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    fn find(&self, name: &str) -> Option<&'a Column> {
        self.frame
            .get_columns()
            .iter()
            .find(|column| column.name().as_str().trim() == name)
    }

    /// Returns the named column, failing fast if the schema lacks it.
    pub fn column(&self, name: &str) -> Result<&'a StringChunked, LoadError> {
        let column = self.find(name).ok_or_else(|| LoadError::MissingColumn {
            table: self.table.to_string(),
            column: name.to_string(),
        })?;
        column.str().map_err(|source| LoadError::ColumnType {
            table: self.table.to_string(),
            column: name.to_string(),
            source,
        })
    }
}

/// Trimmed cell text; `None` for nulls.
pub fn cell(column: &StringChunked, idx: usize) -> Option<&str> {
    column.get(idx).map(str::trim)
}
