//! Schema-driven data grid model.
//!
//! A grid is a list of [`Row`]s read through a list of [`Column`] descriptors.
//! The same descriptors feed both the on-screen table (via [`display_cell`])
//! and the export path (via [`export_value`]), so an exported file always
//! carries the values a user sees.

pub mod cell;
pub mod column;
pub mod row;

pub use cell::{display_cell, export_value, raw_value, value_to_text, Badge, CellValue, Tone};
pub use column::{Column, ACTIONS_FIELD};
pub use row::{KeyedRows, Row, RowKey, RowKeyError};
