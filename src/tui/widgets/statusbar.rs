use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::View;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, view: &View, message: Option<&str>) {
    if let Some(msg) = message {
        let style = if msg.starts_with('✗') {
            theme::coral()
        } else {
            theme::sand()
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(msg, style)))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let hints: &[(&str, &str)] = match view {
        View::Calendar => &[
            ("[←↑↓→]", " day  "),
            ("[ [ ] ]", " month  "),
            ("[t]", " today  "),
            ("[Tab]", " places  "),
            ("[?]", " help  "),
            ("[Esc]", " quit"),
        ],
        View::Places => &[
            ("[↑↓]", " select  "),
            ("[Tab]", " calendar  "),
            ("[?]", " help  "),
            ("[Esc]", " quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme::teal()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
