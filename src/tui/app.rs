use anyhow::Result;
use chrono::{Duration, Months, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::db::Store;
use crate::journal::Journal;
use crate::models::{Location, Photo, PhotoStats, WeeklyProgress};
use crate::tracker::{JournalZone, MonthGrid};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{calendar, day_photos, header, places, statusbar};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Calendar,
    Places,
}

pub struct App {
    pub view: View,
    pub show_help: bool,
    pub should_quit: bool,
    pub zone: JournalZone,
    pub today: NaiveDate,
    pub selected: NaiveDate,
    pub focus_idx: usize,
    pub message: Option<String>,

    // Cached state (refreshed on navigation)
    pub month_grid: MonthGrid,
    pub day_photos: Vec<Photo>,
    pub places: Vec<(Location, WeeklyProgress)>,
    pub stats: PhotoStats,
}

impl App {
    pub fn new(zone: JournalZone) -> Self {
        let today = zone.today();
        App {
            view: View::Calendar,
            show_help: false,
            should_quit: false,
            zone,
            today,
            selected: today,
            focus_idx: 0,
            message: None,
            month_grid: Vec::new(),
            day_photos: Vec::new(),
            places: Vec::new(),
            stats: PhotoStats::default(),
        }
    }

    pub fn load<S: Store>(&mut self, journal: &Journal<S>) -> Result<()> {
        self.places = journal.weekly_progress()?;
        self.stats = journal.stats(Utc::now())?;
        self.load_selection(journal)
    }

    fn load_selection<S: Store>(&mut self, journal: &Journal<S>) -> Result<()> {
        self.month_grid = journal.month(self.selected)?;
        self.day_photos = journal.photos_on(self.selected)?;
        Ok(())
    }

    fn reload<S: Store>(&mut self, journal: &Journal<S>, selection_only: bool) {
        let result = if selection_only {
            self.load_selection(journal)
        } else {
            self.load(journal)
        };
        if let Err(e) = result {
            log::error!("Refreshing view failed: {:#}", e);
            self.message = Some(format!("✗ {}", e));
        }
    }

    pub fn tick<S: Store>(&mut self, journal: &Journal<S>) {
        let today = self.zone.today();
        if today != self.today {
            log::debug!("Day changed: {} -> {}", self.today, today);
            if self.selected == self.today {
                self.selected = today;
            }
            self.today = today;
            self.reload(journal, false);
        }
    }

    pub fn handle_key<S: Store>(&mut self, key: KeyEvent, journal: &Journal<S>) {
        // Some terminals also report release/repeat
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.message = None;

        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Tab => {
                self.view = match self.view {
                    View::Calendar => View::Places,
                    View::Places => View::Calendar,
                };
                self.focus_idx = 0;
            }
            KeyCode::Char('r') => {
                self.reload(journal, false);
            }
            _ => match self.view {
                View::Calendar => self.handle_calendar_key(key, journal),
                View::Places => self.handle_places_key(key),
            },
        }
    }

    fn handle_calendar_key<S: Store>(&mut self, key: KeyEvent, journal: &Journal<S>) {
        let target = match key.code {
            KeyCode::Left => self.selected - Duration::days(1),
            KeyCode::Right => self.selected + Duration::days(1),
            KeyCode::Up => self.selected - Duration::days(7),
            KeyCode::Down => self.selected + Duration::days(7),
            KeyCode::Char('[') => self
                .selected
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.selected),
            KeyCode::Char(']') => self
                .selected
                .checked_add_months(Months::new(1))
                .unwrap_or(self.selected),
            KeyCode::Char('t') => self.today,
            _ => return,
        };
        if target != self.selected {
            self.selected = target;
            self.reload(journal, true);
        }
    }

    fn handle_places_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.focus_idx + 1 < self.places.len() {
                    self.focus_idx += 1;
                }
            }
            _ => {}
        }
    }

    // ─── Drawing ────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0], self.today, &self.stats);
        statusbar::render(frame, outer_chunks[2], &self.view, self.message.as_deref());

        match self.view {
            View::Calendar => self.draw_calendar(frame, outer_chunks[1]),
            View::Places => places::render(
                frame,
                outer_chunks[1],
                &self.places,
                self.focus_idx,
                true,
            ),
        }

        if self.show_help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_calendar(&self, frame: &mut Frame, body: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(body);

        calendar::render(
            frame,
            columns[0],
            &self.month_grid,
            self.selected,
            self.today,
            true,
        );
        day_photos::render(frame, columns[1], self.selected, &self.day_photos, &self.zone);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(12).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[← →]", "Previous / next day"),
            ("[↑ ↓]", "Previous / next week (calendar), select (places)"),
            ("[ [ ] ]", "Previous / next month"),
            ("[t]", "Jump to today"),
            ("[Tab]", "Switch calendar / places"),
            ("[r]", "Reload from storage"),
            ("[?]", "Toggle help"),
            ("[Esc] [q]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::teal().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, what) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<12}", key), theme::teal()),
                Span::styled(what, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::teal()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::teal())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run<S: Store>(journal: Journal<S>) -> Result<()> {
    let mut app = App::new(*journal.zone());
    app.load(&journal)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(std::time::Duration::from_secs(30));

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &journal);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(&journal),
            }
        }
    })();

    ratatui::restore();
    result
}
