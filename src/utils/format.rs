use chrono::{DateTime, NaiveDate, Utc};

use crate::tracker::LocalZone;

/// Bar for a ratio; anything past 1.0 draws full.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// "67%", or "—" when the place has no goal.
pub fn format_percentage(pct: f64, has_goal: bool) -> String {
    if has_goal {
        format!("{}%", pct.round() as i64)
    } else {
        "—".to_string()
    }
}

/// "3/5 visits", or "3 visits" without a goal.
pub fn format_visits(visits: u32, goal: u32) -> String {
    if goal > 0 {
        format!("{}/{} visits", visits, goal)
    } else if visits == 1 {
        "1 visit".to_string()
    } else {
        format!("{} visits", visits)
    }
}

/// Local "HH:MM" of an instant.
pub fn format_local_time(instant: &DateTime<Utc>, zone: &impl LocalZone) -> String {
    zone.local_datetime(instant).format("%H:%M").to_string()
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %b %d, %Y").to_string()
}
