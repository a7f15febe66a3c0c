use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 20, 24);
pub const SURFACE: Color = Color::Rgb(22, 30, 36);
pub const BORDER: Color = Color::Rgb(44, 60, 70);
pub const TEXT: Color = Color::Rgb(220, 228, 230);
pub const TEXT_DIM: Color = Color::Rgb(112, 130, 138);
pub const TEAL: Color = Color::Rgb(64, 168, 160);
pub const SAND: Color = Color::Rgb(214, 184, 120);
pub const GREEN: Color = Color::Rgb(96, 170, 96);
pub const CORAL: Color = Color::Rgb(208, 104, 84);
pub const PHOTO_DAY: Color = Color::Rgb(40, 96, 150);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn teal() -> Style {
    Style::default().fg(TEAL)
}

pub fn sand() -> Style {
    Style::default().fg(SAND)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn coral() -> Style {
    Style::default().fg(CORAL)
}

/// Calendar cell for a day that has photos.
pub fn photo_day() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(PHOTO_DAY)
        .add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    if focused {
        teal()
    } else {
        Style::default().fg(BORDER)
    }
}
