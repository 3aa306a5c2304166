//! Cell rendering pipeline.
//!
//! Given a row and a column descriptor, produce what the grid shows
//! ([`display_cell`]) and what an export writes ([`export_value`]). Both are
//! pure functions of their inputs.

use serde_json::Value;

use super::column::Column;
use super::row::Row;

static NULL: Value = Value::Null;

/// Visual emphasis of a [`Badge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

/// A styled label, the grid's equivalent of a status chip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

/// What a cell renderer produces.
///
/// Only `Text` is exportable. A `Rich` cell exports the raw field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Rich(Badge),
}

impl CellValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Self::Rich(Badge {
            label: label.into(),
            tone,
        })
    }

    /// The plain string, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rich(_) => None,
        }
    }

    /// The characters a terminal shows for this cell
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Rich(badge) => &badge.label,
        }
    }
}

/// Read a field from a row; absent fields read as `null`
pub fn raw_value<'a>(row: &'a Row, field: &str) -> &'a Value {
    row.get(field).unwrap_or(&NULL)
}

/// Plain text of a JSON value: `null` is empty, strings are unquoted, and
/// everything else uses its compact JSON form
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// On-screen representation of one cell
pub fn display_cell(column: &Column, row: &Row) -> CellValue {
    let raw = raw_value(row, column.field());

    if let Some(render) = column.renderer() {
        return render(raw, row);
    }
    if let Some(format) = column.formatter() {
        return CellValue::Text(format(raw));
    }
    CellValue::Text(value_to_text(raw))
}

/// Exported value of one cell.
///
/// Precedence: the value formatter, then a text result of the cell renderer,
/// then the raw field value.
pub fn export_value(column: &Column, row: &Row) -> Value {
    let raw = raw_value(row, column.field());

    if let Some(format) = column.formatter() {
        return Value::String(format(raw));
    }
    if let Some(render) = column.renderer() {
        if let CellValue::Text(text) = render(raw, row) {
            return Value::String(text);
        }
    }
    raw.clone()
}
