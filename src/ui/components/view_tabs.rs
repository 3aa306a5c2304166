//! View tabs and the filter/sort summary line

use crate::backend::ListResource;
use crate::list::ListController;
use crate::pages::PageDefinition;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

pub struct ViewTabs;

impl ViewTabs {
    /// `views` as `(resource, title)` in tab order
    pub fn render(f: &mut Frame, area: Rect, views: &[(ListResource, &str)], current: ListResource) {
        let titles: Vec<Line> = views
            .iter()
            .enumerate()
            .map(|(index, (_, title))| Line::from(format!("{} {}", index + 1, title)))
            .collect();
        let selected = views.iter().position(|(resource, _)| *resource == current).unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .divider("│");
        f.render_widget(tabs, area);
    }

    /// `Filters: Status=New • Sort: Risk Score ↓ • 50/page`
    pub fn render_summary(f: &mut Frame, area: Rect, page: &PageDefinition, controller: &ListController) {
        let active: Vec<String> = controller
            .filters()
            .fields()
            .iter()
            .filter(|field| field.is_active())
            .map(|field| format!("{}={}", field.label, field.display_value()))
            .collect();
        let filters = if active.is_empty() {
            "none".to_string()
        } else {
            active.join(", ")
        };

        let arrow = match controller.sort_order() {
            crate::backend::SortOrder::Asc => "↑",
            crate::backend::SortOrder::Desc => "↓",
        };

        let line = Line::from(vec![
            Span::styled("Filters: ", Style::default().fg(Color::Gray)),
            Span::styled(filters, Style::default().fg(Color::White)),
            Span::styled(" • Sort: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} {}", page.sort_label(controller.sort_by()), arrow),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!(" • {}/page", controller.per_page()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}
