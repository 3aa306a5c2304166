use super::common::{create_dialog_block, create_instructions_paragraph, shortcuts};
use crate::backend::Overview;
use crate::constants::DIALOG_TITLE_OVERVIEW;
use crate::pages::overview::{COUNTER_CARDS, MODEL_CARDS};
use crate::ui::components::StatsBar;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Clear, Paragraph},
    Frame,
};

fn section_title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
}

/// Counter cards for the dashboard overview; a loading line until the first
/// response arrives.
pub fn render_overview_dialog(f: &mut Frame, area: Rect, overview: Option<&Overview>) {
    let dialog_area = LayoutManager::centered_rect_lines(90, 15, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(DIALOG_TITLE_OVERVIEW, Color::Cyan);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    match overview {
        Some(overview) => {
            let (first, second) = COUNTER_CARDS.split_at(COUNTER_CARDS.len() / 2);
            f.render_widget(section_title("Activity"), chunks[0]);
            StatsBar::render(f, chunks[1], first, &overview.counters);
            StatsBar::render(f, chunks[2], second, &overview.counters);
            f.render_widget(section_title("Model performance"), chunks[3]);
            StatsBar::render(f, chunks[4], &MODEL_CARDS, &overview.model);
        }
        None => {
            let loading = Paragraph::new("Loading overview...")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(loading, chunks[2]);
        }
    }

    let instructions = create_instructions_paragraph(&[
        ("r", Color::Cyan, " Refresh"),
        shortcuts::SEPARATOR,
        ("e", Color::Green, " Export"),
        shortcuts::SEPARATOR,
        ("Esc", Color::Red, " Close"),
    ]);
    f.render_widget(instructions, chunks[6]);
}
