//! Export of grid contents to CSV.
//!
//! [`engine`] derives a flat document from the rows and columns currently on
//! screen; [`csv`] encodes such a document and writes it to disk.

pub mod csv;
pub mod engine;

pub use self::csv::{
    encode_records, export_file_name, records_from_objects, write_csv, write_csv_dated, write_file, UTF8_BOM,
};
pub use engine::{derive_document, export_headers, ExportRecord, GridExporter};

use std::io;

/// Errors raised while exporting
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,

    #[error("I/O error while writing export: {0}")]
    Io(#[from] io::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] ::csv::Error),
}
