//! CSV serializer.
//!
//! Output is UTF-8 with a byte-order mark, comma separated, `\n` terminated,
//! and quotes only the fields that contain a comma, a double quote or a line
//! break.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::engine::ExportRecord;
use super::ExportError;
use crate::grid::value_to_text;
use crate::utils::datetime;

/// Byte-order mark prefixed to every export so spreadsheets detect UTF-8
pub const UTF8_BOM: &str = "\u{feff}";

/// `{filename}_{YYYY-MM-DD}.csv`
pub fn export_file_name(filename: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", filename, datetime::format_ymd(date))
}

/// Encode records as CSV bytes, BOM included.
///
/// The header comes from the key order of the first record; later records are
/// read by those keys, missing keys producing empty cells.
pub fn encode_records(records: &[ExportRecord]) -> Result<Vec<u8>, ExportError> {
    let mut out = UTF8_BOM.as_bytes().to_vec();

    let Some(first) = records.first() else {
        return Ok(out);
    };

    let headers: Vec<&str> = first.keys().collect();
    write_line(&mut out, headers.iter().map(|header| header.to_string()).collect())?;

    for record in records {
        let cells = headers
            .iter()
            .map(|header| record.get(header).map(value_to_text).unwrap_or_default())
            .collect();
        write_line(&mut out, cells)?;
    }

    Ok(out)
}

/// Write one CSV line. A line made of a single empty cell stays empty; the
/// `csv` writer would otherwise quote it as `""`.
fn write_line(out: &mut Vec<u8>, cells: Vec<String>) -> Result<(), ExportError> {
    if let [only] = cells.as_slice() {
        if only.is_empty() {
            out.push(b'\n');
            return Ok(());
        }
    }
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(&mut *out);
    writer.write_record(&cells)?;
    writer.flush()?;
    Ok(())
}

/// Write records to `{directory}/{filename}_{today}.csv`.
///
/// Empty input is a no-op: nothing is written and `Ok(None)` is returned.
pub fn write_csv(records: &[ExportRecord], filename: &str, directory: &Path) -> Result<Option<PathBuf>, ExportError> {
    write_csv_dated(records, filename, directory, datetime::export_date())
}

/// [`write_csv`] with an explicit export date.
pub fn write_csv_dated(
    records: &[ExportRecord],
    filename: &str,
    directory: &Path,
    date: NaiveDate,
) -> Result<Option<PathBuf>, ExportError> {
    if records.is_empty() {
        warn!("No data to export for '{}'", filename);
        return Ok(None);
    }

    let bytes = encode_records(records)?;
    let target = write_file(&bytes, &export_file_name(filename, date), directory)?;
    Ok(Some(target))
}

/// Write `bytes` verbatim to `{directory}/{file_name}`.
///
/// Used for server-generated files as well as CSV exports. The bytes are
/// staged in a temporary file inside `directory` and renamed into place once
/// complete.
pub fn write_file(bytes: &[u8], file_name: &str, directory: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(directory)?;

    let target = directory.join(file_name);
    let mut staged = NamedTempFile::new_in(directory)?;
    staged.write_all(bytes)?;
    staged.flush()?;
    staged.persist(&target).map_err(|e| ExportError::Io(e.error))?;

    debug!("Wrote {} bytes to {}", bytes.len(), target.display());
    Ok(target)
}

/// Turn plain JSON objects into export records, for report flows that do
/// not go through a grid. Non-object entries are skipped.
pub fn records_from_objects(objects: &[Value]) -> Vec<ExportRecord> {
    objects
        .iter()
        .filter_map(|object| match object {
            Value::Object(map) => Some(ExportRecord::from(map.clone())),
            other => {
                warn!("Skipping non-object export entry: {}", other);
                None
            }
        })
        .collect()
}
