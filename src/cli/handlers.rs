use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::config::AppConfig;
use crate::db::Store;
use crate::journal::{CaptureRequest, Journal, VisitOutcome};
use crate::models::photo::format_coords;
use crate::models::CaptureEvent;
use crate::tracker::{weekly_progress, MonthGrid};
use crate::utils::format::{
    format_local_time, format_long_date, format_percentage, format_visits, progress_bar,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const TEAL: &str = "\x1b[38;2;64;168;160m";
const RESET: &str = "\x1b[0m";

// ─── Capture ─────────────────────────────────────────────────────────────────

pub struct CaptureArgs {
    pub uri: String,
    pub lat: f64,
    pub lon: f64,
    pub at: Option<String>,
    pub place: Option<String>,
    pub goal: Option<u32>,
    pub note: Option<String>,
}

pub fn handle_capture<S: Store>(journal: &mut Journal<S>, args: CaptureArgs) -> Result<()> {
    let now = Utc::now();
    let timestamp = match &args.at {
        Some(s) => parse_instant(s)?,
        None => now,
    };

    let request = CaptureRequest {
        event: CaptureEvent {
            uri: args.uri,
            latitude: args.lat,
            longitude: args.lon,
            timestamp,
        },
        place: args.place,
        visit_goal: args.goal,
        description: args.note,
    };
    let has_place = request.place.as_deref().is_some_and(|p| !p.trim().is_empty());

    let outcome = journal.capture(request, now)?;

    println!();
    println_colored!(GREEN, "  ✓ Photo saved  {}", outcome.photo.id);
    match outcome.visit {
        VisitOutcome::Created(location) => {
            println_colored!(
                TEAL,
                "  New place: {}  ({})",
                location.name,
                format_visits(location.current_visits, location.visit_goal)
            );
        }
        VisitOutcome::Visited {
            location,
            rolled_over,
        } => {
            if rolled_over {
                println_colored!(DIM, "  New week started for {}", location.name);
            }
            let progress = weekly_progress(&location);
            println_colored!(
                TEAL,
                "  {}  {}  {}",
                location.name,
                format_visits(location.current_visits, location.visit_goal),
                format_percentage(progress.completion_percentage, location.has_goal())
            );
            if location.goal_met() {
                println_colored!(GREEN, "  ★ Weekly goal reached");
            }
        }
        VisitOutcome::Loose => {
            if has_place && !outcome.photo.has_fix() {
                println_colored!(AMBER, "  No location fix; place not created");
            }
        }
    }
    println!();
    Ok(())
}

// ─── Places ──────────────────────────────────────────────────────────────────

pub fn handle_places<S: Store>(journal: &Journal<S>) -> Result<()> {
    let places = journal.weekly_progress()?;

    println!();
    if places.is_empty() {
        println_colored!(DIM, "  No places yet. Use `wayfarer capture <uri> --place NAME`.");
        println!();
        return Ok(());
    }

    println_colored!(TEAL, "  Places ({})", places.len());
    println!();
    for (location, progress) in &places {
        let bar = if location.has_goal() {
            progress_bar(progress.bar_ratio(), 12)
        } else {
            " ".repeat(12)
        };
        let color = if location.goal_met() { GREEN } else { BOLD };
        println_colored!(
            color,
            "  {:<24} {}  {:<12} {:>5}",
            location.name,
            bar,
            format_visits(location.current_visits, location.visit_goal),
            format_percentage(progress.completion_percentage, location.has_goal())
        );
        println_colored!(
            DIM,
            "  {:<24} week of {}  ·  {}  ·  {} photos",
            "",
            progress.week_start_date,
            format_coords(location.latitude, location.longitude),
            location.photos.len()
        );
    }

    let with_goal = places.iter().filter(|(l, _)| l.has_goal()).count();
    println!();
    println_colored!(
        AMBER,
        "  Goals met this week: {}/{}",
        journal.goals_met()?,
        with_goal
    );
    println!();
    Ok(())
}

// ─── Day ─────────────────────────────────────────────────────────────────────

pub fn handle_day<S: Store>(journal: &Journal<S>, date: Option<&str>) -> Result<()> {
    let date = match date {
        Some(s) => parse_date(s)?,
        None => journal.today(),
    };
    let photos = journal.photos_on(date)?;

    println!();
    println_colored!(TEAL, "  {}", format_long_date(date));
    println!();
    if photos.is_empty() {
        println_colored!(DIM, "  No photos on this day");
    }
    for photo in &photos {
        println!(
            "  {}  {:<24} {}",
            format_local_time(&photo.timestamp, journal.zone()),
            photo.location_name.as_deref().unwrap_or("—"),
            format_coords(photo.latitude, photo.longitude),
        );
        println_colored!(DIM, "         {}  {}", photo.uri, photo.id);
        if let Some(note) = &photo.description {
            println_colored!(DIM, "         “{}”", note);
        }
    }
    println!();
    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar<S: Store>(journal: &Journal<S>, month: Option<&str>) -> Result<()> {
    let today = journal.today();
    let any_day = match month {
        Some(s) => parse_month(s)?,
        None => today,
    };
    let grid = journal.month(any_day)?;

    println!();
    println_colored!(TEAL, "  {}", any_day.format("%B %Y"));
    println!();
    for line in render_month(&grid, today) {
        println!("  {}", line);
    }
    println!();
    println_colored!(DIM, "  {}██{} = photos taken", GREEN, DIM);
    println!();
    Ok(())
}

fn render_month(grid: &MonthGrid, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![format!("{}Mo Tu We Th Fr Sa Su{}", DIM, RESET)];
    for week in grid {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "  ".to_string(),
                Some(c) => {
                    let mut style = String::new();
                    if c.has_photos {
                        style.push_str(GREEN);
                        style.push_str(BOLD);
                    }
                    if c.date == today {
                        style.push_str("\x1b[4m");
                    }
                    if style.is_empty() {
                        format!("{:>2}", c.date.day())
                    } else {
                        format!("{}{:>2}{}", style, c.date.day(), RESET)
                    }
                }
            })
            .collect();
        lines.push(cells.join(" "));
    }
    lines
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats<S: Store>(journal: &Journal<S>) -> Result<()> {
    let stats = journal.stats(Utc::now())?;
    let places = journal.locations()?;

    println!();
    println_colored!(TEAL, "  Statistics");
    println!();
    println_colored!(BOLD, "  Today:       {} photos", stats.today);
    println_colored!(BOLD, "  This week:   {} photos", stats.this_week);
    println_colored!(BOLD, "  This month:  {} photos", stats.this_month);
    println!();
    println!(
        "  Places:      {}  ({} goals met)",
        places.len(),
        journal.goals_met()?
    );
    println!();
    Ok(())
}

// ─── Maintenance ─────────────────────────────────────────────────────────────

pub fn handle_delete<S: Store>(journal: &mut Journal<S>, id: &str) -> Result<()> {
    if journal.delete_photo(id)? {
        println_colored!(GREEN, "  ✓ Deleted photo {}", id);
        Ok(())
    } else {
        Err(anyhow!("No photo with id '{}'", id))
    }
}

pub fn handle_export<S: Store>(journal: &Journal<S>) -> Result<()> {
    let export = journal.export()?;
    let json = serde_json::to_string_pretty(&export).context("Serializing export")?;
    println!("{}", json);
    Ok(())
}

pub fn handle_clear<S: Store>(journal: &mut Journal<S>, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete everything without --yes");
    }
    journal.clear_all()?;
    println_colored!(AMBER, "  All photos and places removed");
    Ok(())
}

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init {
        if path.exists() {
            println_colored!(DIM, "  Config already exists");
        } else {
            config.save()?;
            println_colored!(GREEN, "  ✓ Wrote {}", path.display());
        }
    }
    println!();
    println!("  Config file:  {}", path.display());
    println!("  Journal:      {}", config.store_path()?.display());
    println!("  Backend:      {:?}", config.storage.backend);
    println!("  Default goal: {}", config.journal.default_visit_goal);
    match config.journal.timezone_offset {
        Some(m) => println!("  Timezone:     UTC{:+} min", m),
        None => println!("  Timezone:     system"),
    }
    println!();
    Ok(())
}

// ─── Parsing helpers ─────────────────────────────────────────────────────────

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}'. Use YYYY-MM-DD", s))
}

/// "2024-06" → 2024-06-01
fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid month '{}'. Use YYYY-MM", s))
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Invalid time '{}': {}. Use e.g. 2024-06-01T10:00:00+02:00", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::month_grid;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-06-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_date("01/06/2024").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-02").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("June").is_err());
    }

    #[test]
    fn test_parse_instant_normalizes_to_utc() {
        assert_eq!(
            parse_instant("2024-06-01T10:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
        );
        assert!(parse_instant("2024-06-01 10:00").is_err());
    }

    #[test]
    fn test_render_month_marks_photo_days() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let index: BTreeSet<_> = [day].into_iter().collect();
        let lines = render_month(&month_grid(day, &index), NaiveDate::MIN);

        assert_eq!(lines.len(), 6);
        // first week: Sat 1, Sun 2
        assert_eq!(lines[1], format!("{} 1  2", " ".repeat(15)));
        assert!(lines[3].contains(&format!("{}{}12{}", GREEN, BOLD, RESET)));
        assert!(!lines[3].contains(&format!("{}11", GREEN)));
    }
}
