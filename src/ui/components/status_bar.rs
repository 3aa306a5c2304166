//! Status bar component

use crate::list::ListController;
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Paging counters on the left of the shortcut hints, or the current
    /// notice when there is one.
    pub fn render(
        f: &mut Frame,
        area: ratatui::layout::Rect,
        controller: &ListController,
        notice: Option<&str>,
        background_tasks: usize,
    ) {
        let paging = format!(
            "Page {}/{} • {} rows",
            controller.page(),
            controller.total_pages().max(1),
            controller.total_count()
        );

        let status_text = if controller.is_loading() {
            format!("{} • Loading…", paging)
        } else if let Some(notice) = notice {
            format!("{} • {}", paging, notice)
        } else {
            format!("{} • n/p: page • f: filters • e: export • ?: help • q: quit", paging)
        };

        let status_color = if controller.error().is_some() {
            Color::Red
        } else if controller.is_loading() || background_tasks > 0 {
            Color::Yellow
        } else {
            Color::Gray
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
