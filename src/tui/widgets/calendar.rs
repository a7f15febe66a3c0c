use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tracker::MonthGrid;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    grid: &MonthGrid,
    selected: NaiveDate,
    today: NaiveDate,
    focused: bool,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", selected.format("%B %Y")),
            theme::teal(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(" Mo  Tu  We  Th  Fr  Sa  Su ", theme::dim())),
        Line::from(""),
    ];

    for week in grid {
        let mut spans = Vec::new();
        for cell in week {
            match cell {
                None => spans.push(Span::raw("    ")),
                Some(c) => {
                    let mut style = if c.has_photos {
                        theme::photo_day()
                    } else {
                        Style::default().fg(theme::TEXT)
                    };
                    if c.date == today {
                        style = style.add_modifier(Modifier::UNDERLINED).fg(theme::SAND);
                    }
                    if c.date == selected {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(format!("{:>2}", c.date.day()), style));
                    spans.push(Span::raw(" "));
                }
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" ■ ", Style::default().fg(theme::PHOTO_DAY)),
        Span::styled("photos taken", theme::dim()),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
