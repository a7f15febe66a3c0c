use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::PhotoStats;
use crate::tui::theme;
use crate::utils::format::format_long_date;

pub fn render(frame: &mut Frame, area: Rect, today: NaiveDate, stats: &PhotoStats) {
    let title_line = Line::from(vec![
        Span::styled("  ✈  ", theme::sand()),
        Span::styled("wayfarer", theme::teal().add_modifier(Modifier::BOLD)),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(format_long_date(today), theme::dim()),
    ]);

    let stats_line = Line::from(vec![
        Span::styled("today ", theme::dim()),
        Span::styled(stats.today.to_string(), theme::bold()),
        Span::styled("   this week ", theme::dim()),
        Span::styled(stats.this_week.to_string(), theme::bold()),
        Span::styled("   this month ", theme::dim()),
        Span::styled(stats.this_month.to_string(), theme::bold()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::teal())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, stats_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
