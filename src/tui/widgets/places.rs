use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{Location, WeeklyProgress};
use crate::tui::theme;
use crate::utils::format::{format_percentage, format_visits, progress_bar};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    places: &[(Location, WeeklyProgress)],
    focused_idx: usize,
    focused: bool,
) {
    let met = places.iter().filter(|(l, _)| l.goal_met()).count();
    let with_goal = places.iter().filter(|(l, _)| l.has_goal()).count();

    let block = Block::default()
        .title(Span::styled(
            format!(" Places · goals met {}/{} ", met, with_goal),
            theme::teal(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    if places.is_empty() {
        let items = vec![
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(Span::styled(
                "  No places yet. Name one with `wayfarer capture --place`.",
                theme::dim(),
            ))),
        ];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let items: Vec<ListItem> = places
        .iter()
        .enumerate()
        .map(|(i, (location, progress))| {
            let is_focused = focused && i == focused_idx;
            let name_style = if is_focused {
                theme::teal().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            let (bar, bar_style) = if location.goal_met() {
                (progress_bar(progress.bar_ratio(), 10), theme::green())
            } else if location.has_goal() {
                (progress_bar(progress.bar_ratio(), 10), theme::sand())
            } else {
                ("·".repeat(10), theme::dim())
            };

            let mut spans = vec![
                Span::styled(if is_focused { " ▸ " } else { "   " }, theme::teal()),
                Span::styled(format!("{:<20}", location.name), name_style),
                Span::styled(bar, bar_style),
                Span::styled(
                    format!(
                        "  {:<12} {:>5}",
                        format_visits(progress.actual_visits, progress.target_visits),
                        format_percentage(progress.completion_percentage, location.has_goal())
                    ),
                    theme::dim(),
                ),
            ];
            if location.goal_met() {
                spans.push(Span::styled("  ★", theme::green()));
            }
            let detail = Line::from(Span::styled(
                format!(
                    "      week of {}  ·  {} photos",
                    progress.week_start_date,
                    location.photos.len()
                ),
                theme::dim(),
            ));
            ListItem::new(vec![Line::from(spans), detail])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
