//! Export derivation engine.
//!
//! Re-applies the grid's column transformations to the rows already loaded,
//! producing one [`ExportRecord`] per row. Nothing is fetched and nothing is
//! reordered.

use log::{debug, info};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::ExportError;
use crate::grid::{export_value, Column, Row};

/// One exported row: header name to value, in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRecord {
    fields: Vec<(String, Value)>,
}

impl ExportRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. A key that is already present keeps its position and
    /// takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<serde_json::Map<String, Value>> for ExportRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ExportRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Header names of the exported columns, in declaration order
pub fn export_headers(columns: &[Column]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| !column.is_actions())
        .map(|column| column.header_name().to_string())
        .collect()
}

/// Build the flat export document for `rows` as seen through `columns`
pub fn derive_document(rows: &[Row], columns: &[Column]) -> Result<Vec<ExportRecord>, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NoData);
    }

    let exported: Vec<&Column> = columns.iter().filter(|column| !column.is_actions()).collect();
    let records = rows
        .iter()
        .map(|row| {
            exported
                .iter()
                .map(|column| (column.header_name(), export_value(column, row)))
                .collect::<ExportRecord>()
        })
        .collect();

    Ok(records)
}

/// Writes grid exports into a fixed directory
#[derive(Debug, Clone)]
pub struct GridExporter {
    directory: PathBuf,
}

impl GridExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Export the rows currently shown.
    ///
    /// Absent or empty rows produce [`ExportError::NoData`] and no file.
    pub fn export(&self, rows: Option<&[Row]>, columns: &[Column], filename: &str) -> Result<PathBuf, ExportError> {
        let rows = rows.unwrap_or_default();
        let records = derive_document(rows, columns)?;
        debug!("Derived {} export records for '{}'", records.len(), filename);

        let path = super::csv::write_csv(&records, filename, &self.directory)?.ok_or(ExportError::NoData)?;
        info!("Exported {} rows to {}", records.len(), path.display());
        Ok(path)
    }
}
