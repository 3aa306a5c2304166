//! Column descriptors

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::cell::CellValue;
use super::row::Row;

/// Field name reserved for interactive controls; never exported
pub const ACTIONS_FIELD: &str = "actions";

/// Default layout width of a column, in terminal cells
pub const DEFAULT_COLUMN_WIDTH: u16 = 15;

/// Turns a raw field value into display text
pub type ValueFormatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Turns a raw field value (with its row for context) into a cell
pub type CellRenderer = Arc<dyn Fn(&Value, &Row) -> CellValue + Send + Sync>;

/// Declarative description of one grid column
#[derive(Clone)]
pub struct Column {
    field: String,
    header_name: Option<String>,
    width: u16,
    value_formatter: Option<ValueFormatter>,
    render_cell: Option<CellRenderer>,
}

impl Column {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: None,
            width: DEFAULT_COLUMN_WIDTH,
            value_formatter: None,
            render_cell: None,
        }
    }

    /// The interactive controls column
    pub fn actions(header: impl Into<String>) -> Self {
        Self::new(ACTIONS_FIELD).header(header)
    }

    #[must_use]
    pub fn header(mut self, header_name: impl Into<String>) -> Self {
        self.header_name = Some(header_name.into());
        self
    }

    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn value_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.value_formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn render_cell<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&Value, &Row) -> CellValue + Send + Sync + 'static,
    {
        self.render_cell = Some(Arc::new(renderer));
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Header label, falling back to the field name
    pub fn header_name(&self) -> &str {
        self.header_name.as_deref().unwrap_or(&self.field)
    }

    pub fn layout_width(&self) -> u16 {
        self.width
    }

    pub fn formatter(&self) -> Option<&ValueFormatter> {
        self.value_formatter.as_ref()
    }

    pub fn renderer(&self) -> Option<&CellRenderer> {
        self.render_cell.as_ref()
    }

    pub fn is_actions(&self) -> bool {
        self.field == ACTIONS_FIELD
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("width", &self.width)
            .field("value_formatter", &self.value_formatter.is_some())
            .field("render_cell", &self.render_cell.is_some())
            .finish()
    }
}
