//! Utility modules for fraudwatch.
//!
//! Small, pure helpers shared by the column definitions, the export writer
//! and the UI.
//!
//! - [`datetime`] - Export date stamps and display formatting of backend timestamps
//! - [`format`] - Locale-style number grouping used by amount columns

pub mod datetime;
pub mod format;
