//! Data grid for the current page of rows

use crate::grid::{display_cell, Column, Row};
use crate::ui::components::badge::create_cell_span;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};

pub struct GridTableComponent {
    columns: Vec<Column>,
    rows: Vec<Row>,
    title: String,
    loading: bool,
    table_state: TableState,
}

impl Default for GridTableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GridTableComponent {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            title: String::new(),
            loading: false,
            table_state: TableState::default(),
        }
    }

    /// Replace the grid contents. The selection is kept when still in range.
    pub fn update_data(&mut self, title: String, columns: Vec<Column>, rows: Vec<Row>, loading: bool) {
        self.title = title;
        self.columns = columns;
        self.rows = rows;
        self.loading = loading;

        let selected = match self.table_state.selected() {
            _ if self.rows.is_empty() => None,
            Some(index) => Some(index.min(self.rows.len() - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.table_state.selected().and_then(|index| self.rows.get(index))
    }

    fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(index) if index + 1 < self.rows.len() => index + 1,
            Some(index) => index,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let previous = self.table_state.selected().map_or(0, |index| index.saturating_sub(1));
        self.table_state.select(Some(previous));
    }

    fn block(&self) -> Block<'static> {
        let title = if self.loading {
            format!(" {} (loading…) ", self.title)
        } else {
            format!(" {} ", self.title)
        };
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Gray))
    }
}

impl Component for GridTableComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Action::None
            }
            KeyCode::Home => {
                if !self.rows.is_empty() {
                    self.table_state.select(Some(0));
                }
                Action::None
            }
            KeyCode::End => {
                if !self.rows.is_empty() {
                    self.table_state.select(Some(self.rows.len() - 1));
                }
                Action::None
            }
            KeyCode::Enter => Action::OpenSelectedRow,
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if self.rows.is_empty() {
            let message = if self.loading { "Loading…" } else { "No rows" };
            let empty = Paragraph::new(message)
                .block(self.block())
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, rect);
            return;
        }

        let header = TableRow::new(
            self.columns
                .iter()
                .map(|column| Cell::from(column.header_name().to_string())),
        )
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let rows = self.rows.iter().map(|row| {
            TableRow::new(
                self.columns
                    .iter()
                    .map(|column| Cell::from(Line::from(create_cell_span(&display_cell(column, row))))),
            )
        });

        let widths: Vec<Constraint> = self
            .columns
            .iter()
            .map(|column| Constraint::Length(column.layout_width()))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(self.block())
            .column_spacing(1)
            .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, rect, &mut self.table_state);
    }
}
