use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::photo::format_coords;
use crate::models::Photo;
use crate::tracker::JournalZone;
use crate::tui::theme;
use crate::utils::format::{format_local_time, format_long_date};

pub fn render(frame: &mut Frame, area: Rect, date: NaiveDate, photos: &[Photo], zone: &JournalZone) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", format_long_date(date)), theme::teal()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    if photos.is_empty() {
        let items = vec![
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(Span::styled("  No photos on this day", theme::dim()))),
        ];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let items: Vec<ListItem> = photos
        .iter()
        .map(|p| {
            let place = p.location_name.as_deref().unwrap_or("—");
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(format!("  {}  ", format_local_time(&p.timestamp, zone)), theme::sand()),
                    Span::styled(place.to_string(), theme::bold()),
                    Span::styled(
                        format!("  {}", format_coords(p.latitude, p.longitude)),
                        theme::dim(),
                    ),
                ]),
                Line::from(Span::styled(format!("         {}", p.uri), theme::dim())),
            ];
            if let Some(note) = &p.description {
                lines.push(Line::from(Span::styled(format!("         “{}”", note), theme::dim())));
            }
            ListItem::new(lines)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
