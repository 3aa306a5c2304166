//! Modal dialogs.
//!
//! A single component owns whichever dialog is open: notices (info and
//! error), help, logs, the filter and report forms, the go-to-page prompt,
//! the dashboard overview and the alert details view with its review
//! shortcuts.

use crate::backend::{AlertStatus, Overview};
use crate::constants::{DIALOG_TITLE_FILTERS, DIALOG_TITLE_REPORT, ERROR_INVALID_PAGE, ERROR_INVALID_REPORT};
use crate::logger::Logger;
use crate::pages::reports;
use crate::ui::components::dialogs::{common, filter_dialog, overview_dialog, system_dialogs};
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::{Clear, ScrollbarState},
    Frame,
};

const PAGE_SCROLL: usize = 10;

pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    pub input_buffer: String,
    pub selected_filter: usize,
    pub scroll_offset: usize,
    pub scrollbar_state: ScrollbarState,
    logger: Option<Logger>,
}

impl Default for DialogComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogComponent {
    pub fn new() -> Self {
        Self {
            dialog_type: None,
            input_buffer: String::new(),
            selected_filter: 0,
            scroll_offset: 0,
            scrollbar_state: ScrollbarState::new(0),
            logger: None,
        }
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = Some(logger);
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    pub fn showing_overview(&self) -> bool {
        matches!(self.dialog_type, Some(DialogType::Overview(_)))
    }

    /// Swap fresh counters into an open overview dialog
    pub fn refresh_overview(&mut self, overview: Overview) {
        if let Some(DialogType::Overview(current)) = &mut self.dialog_type {
            *current = Some(overview);
        }
    }

    fn clear_dialog(&mut self) {
        self.dialog_type = None;
        self.input_buffer.clear();
        self.selected_filter = 0;
        self.scroll_offset = 0;
        self.scrollbar_state = ScrollbarState::new(0);
    }

    fn close(&mut self) -> Action {
        self.clear_dialog();
        Action::HideDialog
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.scrollbar_state = self.scrollbar_state.position(self.scroll_offset);
    }

    fn scroll_to(&mut self, offset: usize) {
        self.scroll_offset = offset;
        self.scrollbar_state = self.scrollbar_state.position(offset);
    }

    /// Scrolling keys shared by every scrollable dialog; true when handled
    fn handle_scroll_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(PAGE_SCROLL as isize)),
            KeyCode::PageDown => self.scroll_by(PAGE_SCROLL as isize),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(usize::MAX),
            _ => return false,
        }
        true
    }

    /// Close a form dialog and turn its contents into the matching action
    fn submit_form(&mut self) -> Action {
        let dialog = self.dialog_type.take();
        self.clear_dialog();
        match dialog {
            Some(DialogType::Filters(filters)) => Action::ApplyFilters(filters),
            Some(DialogType::Report(form)) => match reports::request(&form) {
                Ok(request) => Action::GenerateReport(request),
                Err(message) => Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_INVALID_REPORT, message))),
            },
            _ => Action::None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let selected = self.selected_filter;
        let filters = match &mut self.dialog_type {
            Some(DialogType::Filters(filters)) | Some(DialogType::Report(filters)) => filters,
            _ => return Action::None,
        };

        match key.code {
            KeyCode::Esc => return self.close(),
            KeyCode::Enter => return self.submit_form(),
            KeyCode::Up => self.selected_filter = selected.saturating_sub(1),
            KeyCode::Down => {
                if selected + 1 < filters.len() {
                    self.selected_filter = selected + 1;
                }
            }
            KeyCode::Tab => {
                if let Some(field) = filters.field_mut(selected) {
                    field.cycle_choice();
                }
            }
            KeyCode::Delete => {
                if let Some(field) = filters.field_mut(selected) {
                    field.value = None;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = filters.field_mut(selected) {
                    if field.choices.is_empty() {
                        if let Some(value) = field.value.as_mut() {
                            value.pop();
                        }
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = filters.field_mut(selected) {
                    if field.choices.is_empty() {
                        field.value.get_or_insert_with(String::new).push(c);
                    }
                }
            }
            _ => {}
        }
        Action::None
    }

    fn handle_go_to_page_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => self.close(),
            KeyCode::Enter => {
                let page = self.input_buffer.parse::<u32>();
                self.clear_dialog();
                match page {
                    Ok(page) => Action::GoToPage(page),
                    Err(_) => Action::ShowDialog(DialogType::Error(ERROR_INVALID_PAGE.to_string())),
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                Action::None
            }
            KeyCode::Char(c) if c.is_ascii_digit() && self.input_buffer.len() < 9 => {
                self.input_buffer.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_overview_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('D') | KeyCode::Char('q') => self.close(),
            KeyCode::Char('r') => Action::RefreshOverview,
            KeyCode::Char('e') => Action::ExportOverview,
            _ => Action::None,
        }
    }

    fn handle_alert_key(&mut self, key: KeyEvent, alert_id: String) -> Action {
        let status = match key.code {
            KeyCode::Char('i') => Some(AlertStatus::InProgress),
            KeyCode::Char('v') => Some(AlertStatus::Processed),
            KeyCode::Char('F') => Some(AlertStatus::FalsePositive),
            _ => None,
        };
        if let Some(status) = status {
            self.clear_dialog();
            return Action::UpdateAlert { alert_id, status };
        }

        match key.code {
            KeyCode::Char('d') => Action::DownloadAlertDetails(alert_id),
            KeyCode::Esc | KeyCode::Char('q') => self.close(),
            _ => {
                self.handle_scroll_key(key);
                Action::None
            }
        }
    }

    fn render_go_to_page_dialog(&self, f: &mut Frame, area: Rect) {
        let dialog_area = LayoutManager::centered_rect_lines(40, 6, area);
        f.render_widget(Clear, dialog_area);

        let block = common::create_dialog_block(" Go to page ", Color::Cyan);
        let inner = block.inner(dialog_area);
        f.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(inner);

        f.render_widget(common::create_input_paragraph(&self.input_buffer, "Page"), chunks[0]);
        f.render_widget(
            common::create_instructions_paragraph(&[
                common::shortcuts::ENTER_CONFIRM,
                common::shortcuts::SEPARATOR,
                common::shortcuts::ESC_CANCEL,
            ]),
            chunks[1],
        );
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match &self.dialog_type {
            None => Action::None,
            Some(DialogType::Info(_)) | Some(DialogType::Error(_)) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(' ') => self.close(),
                _ => Action::None,
            },
            Some(DialogType::Help) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => self.close(),
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            Some(DialogType::Logs) => match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => self.close(),
                _ => {
                    self.handle_scroll_key(key);
                    Action::None
                }
            },
            Some(DialogType::Filters(_)) | Some(DialogType::Report(_)) => self.handle_form_key(key),
            Some(DialogType::Overview(_)) => self.handle_overview_key(key),
            Some(DialogType::GoToPage) => self.handle_go_to_page_key(key),
            Some(DialogType::AlertDetails { alert_id, .. }) => {
                let alert_id = alert_id.clone();
                self.handle_alert_key(key, alert_id)
            }
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                self.clear_dialog();
                self.dialog_type = Some(dialog_type);
                Action::None
            }
            Action::HideDialog => {
                self.clear_dialog();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(dialog_type) = self.dialog_type.clone() else {
            return;
        };

        match dialog_type {
            DialogType::Info(message) => {
                system_dialogs::render_message_dialog(f, rect, " Info ", Color::Blue, &message);
            }
            DialogType::Error(message) => {
                system_dialogs::render_message_dialog(f, rect, " Error ", Color::Red, &message);
            }
            DialogType::Help => {
                self.scroll_offset =
                    system_dialogs::render_help_dialog(f, rect, self.scroll_offset, &mut self.scrollbar_state);
            }
            DialogType::Logs => {
                let logs = self.logger.as_ref().map(Logger::get_logs).unwrap_or_default();
                self.scroll_offset = system_dialogs::render_logs_dialog(
                    f,
                    rect,
                    &logs,
                    self.scroll_offset,
                    &mut self.scrollbar_state,
                );
            }
            DialogType::Filters(filters) => {
                filter_dialog::render_filters_dialog(
                    f,
                    rect,
                    DIALOG_TITLE_FILTERS,
                    &filters,
                    self.selected_filter,
                    " Apply",
                );
            }
            DialogType::Report(form) => {
                filter_dialog::render_filters_dialog(
                    f,
                    rect,
                    DIALOG_TITLE_REPORT,
                    &form,
                    self.selected_filter,
                    " Generate",
                );
            }
            DialogType::Overview(overview) => {
                overview_dialog::render_overview_dialog(f, rect, overview.as_ref());
            }
            DialogType::GoToPage => self.render_go_to_page_dialog(f, rect),
            DialogType::AlertDetails { alert_id, row } => {
                self.scroll_offset = system_dialogs::render_alert_details_dialog(
                    f,
                    rect,
                    &alert_id,
                    &row,
                    self.scroll_offset,
                    &mut self.scrollbar_state,
                );
            }
        }
    }
}
