use super::common::create_instructions_paragraph;
use super::common::shortcuts::{ESC_CANCEL, SEPARATOR};
use crate::constants::{DIALOG_TITLE_ALERT, DIALOG_TITLE_HELP, DIALOG_TITLE_LOGS};
use crate::grid::{value_to_text, Row};
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

const HELP_CONTENT: &str = r"
FRAUDWATCH - Fraud monitoring dashboard
=======================================

VIEWS
-----
1 / 2 / 3   Transactions / Fraud Alerts / Reactivations
Tab         Next view
D           Dashboard overview (r refresh, e export)

GRID
----
j/k ↑↓      Select row
Enter       Open selected alert (Fraud Alerts view)
n / p       Next / previous page
→ / ←       Next / previous page
g           Go to page
+           Cycle rows per page
s           Cycle sort field
o           Toggle sort order (ASC/DESC)
r           Refresh page and statistics

FILTERS
-------
f           Edit filters
x           Reset filters and sorting

FILES
-----
e           Export the current page to CSV
P           Download the parameter export
R           Generate a CD01 report (type and date range)

ALERT DETAILS
-------------
i           Mark in progress
v           Mark processed
F           Mark false positive
d           Download alert details

GENERAL
-------
?           Toggle help
G           Show logs
q / Ctrl+C  Quit
Esc         Close dialog

Exports are written to the configured export directory as
<name>_<YYYY-MM-DD>.csv and contain exactly the cells shown in the grid.
";

/// Render `text` in a bordered box, with a scrollbar when it overflows.
/// Returns the offset actually used, clamped to the last full page.
fn render_scrollable_text(
    f: &mut Frame,
    content_area: Rect,
    title: &str,
    text: &str,
    color: Color,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) -> usize {
    let lines: Vec<&str> = text.lines().collect();
    let total_lines = lines.len();
    let visible_height = content_area.height.saturating_sub(2) as usize;

    let max_scroll = total_lines.saturating_sub(visible_height);
    let clamped_offset = scroll_offset.min(max_scroll);

    *scrollbar_state = scrollbar_state
        .content_length(total_lines)
        .viewport_content_length(visible_height)
        .position(clamped_offset);

    let visible_text = lines
        .iter()
        .skip(clamped_offset)
        .take(visible_height)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let paragraph = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, content_area);

    if total_lines > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("▐")
            .style(Style::default().fg(Color::Gray))
            .thumb_style(Style::default().fg(Color::White));

        f.render_stateful_widget(scrollbar, content_area, scrollbar_state);
    }
    clamped_offset
}

/// Short message box used for info notices and errors
pub fn render_message_dialog(f: &mut Frame, area: Rect, title: &str, color: Color, message: &str) {
    let dialog_area = LayoutManager::centered_rect_lines(60, 8, area);
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(color));

    let content_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + 1,
        dialog_area.width.saturating_sub(2),
        dialog_area.height.saturating_sub(4),
    );
    let instructions_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + dialog_area.height.saturating_sub(2),
        dialog_area.width.saturating_sub(2),
        1,
    );

    let message_paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let instructions_paragraph = Paragraph::new("Press Enter or Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(block, dialog_area);
    f.render_widget(message_paragraph, content_area);
    f.render_widget(instructions_paragraph, instructions_area);
}

pub fn render_help_dialog(
    f: &mut Frame,
    area: Rect,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) -> usize {
    let help_area = LayoutManager::centered_rect(80, 90, area);
    f.render_widget(Clear, help_area);
    render_scrollable_text(
        f,
        help_area,
        DIALOG_TITLE_HELP,
        HELP_CONTENT,
        Color::Cyan,
        scroll_offset,
        scrollbar_state,
    )
}

pub fn render_logs_dialog(
    f: &mut Frame,
    area: Rect,
    logs: &[String],
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) -> usize {
    let logs_area = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, logs_area);

    let content = if logs.is_empty() {
        "No logs available".to_string()
    } else {
        logs.join("\n")
    };
    render_scrollable_text(
        f,
        logs_area,
        DIALOG_TITLE_LOGS,
        &content,
        Color::Gray,
        scroll_offset,
        scrollbar_state,
    )
}

/// Every field of the alert row, one per line, in response order
pub fn alert_details_text(row: &Row) -> String {
    let width = row.keys().map(|key| key.chars().count()).max().unwrap_or(0);
    row.iter()
        .map(|(key, value)| format!("{:<width$}  {}", key, value_to_text(value), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_alert_details_dialog(
    f: &mut Frame,
    area: Rect,
    alert_id: &str,
    row: &Row,
    scroll_offset: usize,
    scrollbar_state: &mut ScrollbarState,
) -> usize {
    let dialog_area = LayoutManager::centered_rect(70, 80, area);
    f.render_widget(Clear, dialog_area);

    let content_area = Rect::new(
        dialog_area.x,
        dialog_area.y,
        dialog_area.width,
        dialog_area.height.saturating_sub(1),
    );
    let instructions_area = Rect::new(
        dialog_area.x,
        dialog_area.y + dialog_area.height.saturating_sub(1),
        dialog_area.width,
        1,
    );

    let title = format!("{} #{}", DIALOG_TITLE_ALERT, alert_id);
    let offset = render_scrollable_text(
        f,
        content_area,
        &title,
        &alert_details_text(row),
        Color::Yellow,
        scroll_offset,
        scrollbar_state,
    );

    let instructions = create_instructions_paragraph(&[
        ("i", Color::Yellow, " In progress"),
        SEPARATOR,
        ("v", Color::Green, " Processed"),
        SEPARATOR,
        ("F", Color::Gray, " False positive"),
        SEPARATOR,
        ("d", Color::Cyan, " Download"),
        SEPARATOR,
        ESC_CANCEL,
    ]);
    f.render_widget(Clear, instructions_area);
    f.render_widget(instructions, instructions_area);
    offset
}
