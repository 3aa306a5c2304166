//! Statistics strip shown above the grid

use crate::backend::Statistics;
use crate::pages::StatCard;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CARD_COLORS: [Color; 4] = [Color::Blue, Color::Red, Color::Rgb(255, 149, 0), Color::Green];

pub struct StatsBar;

impl StatsBar {
    /// One bordered card per counter. Missing counters read as zero.
    pub fn render(f: &mut Frame, area: Rect, cards: &[StatCard], statistics: &Statistics) {
        if cards.is_empty() {
            return;
        }

        let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (index, (card, chunk)) in cards.iter().zip(chunks.iter()).enumerate() {
            let color = CARD_COLORS[index % CARD_COLORS.len()];
            let line = Line::from(vec![
                Span::styled(format!("{}: ", card.label), Style::default().fg(Color::Gray)),
                Span::styled(
                    card.value(statistics),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]);
            let widget = Paragraph::new(line).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            f.render_widget(widget, *chunk);
        }
    }
}
