use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::grid::{Badge, CellValue, Tone};

/// Foreground/background pair for a badge tone
#[must_use]
pub fn tone_style(tone: Tone) -> Style {
    let (fg, bg) = match tone {
        Tone::Neutral => (Color::White, Color::DarkGray),
        Tone::Info => (Color::White, Color::Blue),
        Tone::Success => (Color::Black, Color::Green),
        Tone::Warning => (Color::Black, Color::Rgb(255, 165, 0)),
        Tone::Danger => (Color::White, Color::Red),
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

/// A badge rendered as a padded, colored label
#[must_use]
pub fn create_badge(badge: &Badge) -> Span<'static> {
    Span::styled(format!(" {} ", badge.label), tone_style(badge.tone))
}

/// Span for any grid cell
#[must_use]
pub fn create_cell_span(cell: &CellValue) -> Span<'static> {
    match cell {
        CellValue::Text(text) => Span::raw(text.clone()),
        CellValue::Rich(badge) => create_badge(badge),
    }
}
