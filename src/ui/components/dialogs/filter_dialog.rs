use super::common::{create_dialog_block, create_instructions_paragraph, shortcuts};
use crate::list::FilterSet;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

/// Form editor used for filters and report requests: one line per field,
/// the selected one highlighted. Text fields show a cursor while selected;
/// select fields show their current choice and cycle with Tab. `confirm`
/// labels the Enter shortcut.
pub fn render_filters_dialog(
    f: &mut Frame,
    area: Rect,
    title: &str,
    filters: &FilterSet,
    selected: usize,
    confirm: &'static str,
) {
    let height = filters.len() as u16 + 5;
    let dialog_area = LayoutManager::centered_rect_lines(60, height, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(title, Color::Cyan);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let label_width = filters
        .fields()
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = filters
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let is_selected = index == selected;
            let marker = if is_selected { "▶ " } else { "  " };
            let mut value = field.display_value().to_string();
            if field.choices.is_empty() && is_selected {
                value.push('█');
            } else if value.is_empty() {
                value.push_str("Any");
            }

            let label_style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let value_style = if field.is_active() {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<width$}  ", field.label, width = label_width), label_style),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), chunks[0]);

    let instructions = create_instructions_paragraph(&[
        ("↑↓", Color::Cyan, " Field"),
        shortcuts::SEPARATOR,
        shortcuts::TAB_SELECT,
        shortcuts::SEPARATOR,
        ("Del", Color::Yellow, " Clear"),
        shortcuts::SEPARATOR,
        ("Enter", Color::Green, confirm),
        shortcuts::SEPARATOR,
        shortcuts::ESC_CANCEL,
    ]);
    f.render_widget(instructions, chunks[1]);
}
