use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{Location, Photo, WeeklyProgress};
use crate::tracker::zone::LocalZone;

/// Monday of the week containing the zone-local date of `instant`.
pub fn week_start(instant: &DateTime<Utc>, zone: &impl LocalZone) -> NaiveDate {
    monday_of(zone.local_date(instant))
}

/// Weeks run Monday to Sunday. Day numbers count from Sunday = 0, so a
/// Sunday steps back six days rather than forward one.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let day = date.weekday().num_days_from_sunday() as i64;
    let back = day - if day == 0 { -6 } else { 1 };
    date - Duration::days(back)
}

pub fn first_of_month(instant: &DateTime<Utc>, zone: &impl LocalZone) -> NaiveDate {
    let date = zone.local_date(instant);
    date - Duration::days(date.day0() as i64)
}

/// Count one visit at `visit_at`, starting a fresh week first if the
/// location's tracked week is over. The photo is appended as the newest visit.
pub fn record_visit(
    mut location: Location,
    photo: Photo,
    visit_at: &DateTime<Utc>,
    zone: &impl LocalZone,
) -> Location {
    let new_week = week_start(visit_at, zone);
    if new_week != location.week_start_date {
        log::debug!(
            "Week rollover for '{}': {} -> {} (dropping {} visits)",
            location.name,
            location.week_start_date,
            new_week,
            location.current_visits
        );
        location.current_visits = 0;
        location.week_start_date = new_week;
    }
    location.current_visits += 1;
    location.photos.push(photo);
    location
}

/// First visit to a place the user just named. Coordinates come from the photo.
pub fn new_location(
    name: &str,
    visit_goal: u32,
    photo: Photo,
    visit_at: &DateTime<Utc>,
    zone: &impl LocalZone,
) -> Location {
    Location {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        latitude: photo.latitude,
        longitude: photo.longitude,
        description: None,
        visit_goal,
        current_visits: 1,
        week_start_date: week_start(visit_at, zone),
        photos: vec![photo],
    }
}

pub fn weekly_progress(location: &Location) -> WeeklyProgress {
    let completion_percentage = if location.visit_goal > 0 {
        location.current_visits as f64 / location.visit_goal as f64 * 100.0
    } else {
        0.0
    };
    WeeklyProgress {
        location_id: location.id.clone(),
        week_start_date: location.week_start_date,
        target_visits: location.visit_goal,
        actual_visits: location.current_visits,
        completion_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn photo(id: &str, timestamp: DateTime<Utc>) -> Photo {
        Photo {
            id: id.to_string(),
            uri: format!("file:///dcim/{}.jpg", id),
            latitude: 43.2965,
            longitude: 5.3698,
            timestamp,
            location_name: Some("Vieux-Port".to_string()),
            description: None,
        }
    }

    fn location(goal: u32, visits: u32, week: NaiveDate) -> Location {
        Location {
            id: "vieux-port".to_string(),
            name: "Vieux-Port".to_string(),
            latitude: 43.2965,
            longitude: 5.3698,
            description: None,
            visit_goal: goal,
            current_visits: visits,
            week_start_date: week,
            photos: Vec::new(),
        }
    }

    #[test]
    fn test_monday_of_every_weekday() {
        // 2024-06-03 is a Monday
        for offset in 0..7 {
            let d = date(2024, 6, 3) + Duration::days(offset);
            assert_eq!(monday_of(d), date(2024, 6, 3), "day {}", d);
        }
        assert_eq!(monday_of(date(2024, 6, 10)), date(2024, 6, 10));
    }

    #[test]
    fn test_sunday_belongs_to_previous_week() {
        let sunday = date(2024, 6, 9);
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(monday_of(sunday), date(2024, 6, 3));
    }

    #[test]
    fn test_monday_across_month_and_year() {
        // Sunday 2024-09-01 -> Monday 2024-08-26
        assert_eq!(monday_of(date(2024, 9, 1)), date(2024, 8, 26));
        // Wednesday 2025-01-01 -> Monday 2024-12-30
        assert_eq!(monday_of(date(2025, 1, 1)), date(2024, 12, 30));
    }

    #[test]
    fn test_week_start_uses_local_date() {
        // Sunday 23:30 UTC is already Monday in UTC+2
        let instant = at(2024, 6, 9, 23, 30);
        assert_eq!(week_start(&instant, &Utc), date(2024, 6, 3));
        let paris = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(week_start(&instant, &paris), date(2024, 6, 10));
    }

    #[test]
    fn test_first_of_month() {
        assert_eq!(first_of_month(&at(2024, 6, 17, 8, 0), &Utc), date(2024, 6, 1));
        assert_eq!(first_of_month(&at(2024, 6, 1, 0, 0), &Utc), date(2024, 6, 1));
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(first_of_month(&at(2024, 7, 1, 2, 0), &minus_five), date(2024, 6, 1));
    }

    #[test]
    fn test_same_week_visits_accumulate() {
        let loc = location(3, 2, date(2024, 6, 3));
        let loc = record_visit(loc, photo("a", at(2024, 6, 5, 9, 0)), &at(2024, 6, 5, 9, 0), &Utc);
        assert_eq!(loc.current_visits, 3);
        assert_eq!(loc.week_start_date, date(2024, 6, 3));
        assert_eq!(weekly_progress(&loc).completion_percentage, 100.0);

        let loc = record_visit(loc, photo("b", at(2024, 6, 9, 20, 0)), &at(2024, 6, 9, 20, 0), &Utc);
        assert_eq!(loc.current_visits, 4);
        assert_eq!(loc.week_start_date, date(2024, 6, 3));
        assert_eq!(
            loc.photos.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_two_visits_add_exactly_two() {
        let before = location(0, 7, date(2024, 6, 3));
        let t1 = at(2024, 6, 4, 12, 0);
        let t2 = at(2024, 6, 8, 18, 0);
        let after = record_visit(before.clone(), photo("a", t1), &t1, &Utc);
        let after = record_visit(after, photo("b", t2), &t2, &Utc);
        assert_eq!(after.current_visits, before.current_visits + 2);
        assert_eq!(after.week_start_date, before.week_start_date);
    }

    #[test]
    fn test_next_week_rolls_over() {
        let loc = location(3, 2, date(2024, 6, 3));
        let monday = at(2024, 6, 10, 7, 0);
        let loc = record_visit(loc, photo("a", monday), &monday, &Utc);
        assert_eq!(loc.current_visits, 1);
        assert_eq!(loc.week_start_date, date(2024, 6, 10));
    }

    #[test]
    fn test_rollover_ignores_prior_count() {
        for prior in [0, 1, 5, 40] {
            let loc = location(2, prior, date(2024, 5, 6));
            let t = at(2024, 6, 12, 10, 0);
            let loc = record_visit(loc, photo("x", t), &t, &Utc);
            assert_eq!(loc.current_visits, 1);
            assert_eq!(loc.week_start_date, date(2024, 6, 10));
        }
    }

    #[test]
    fn test_rollover_when_going_back_in_time() {
        // Any week mismatch resets, even an earlier one.
        let loc = location(2, 3, date(2024, 6, 10));
        let t = at(2024, 6, 4, 10, 0);
        let loc = record_visit(loc, photo("x", t), &t, &Utc);
        assert_eq!(loc.current_visits, 1);
        assert_eq!(loc.week_start_date, date(2024, 6, 3));
    }

    #[test]
    fn test_new_location_starts_at_one_visit() {
        let t = at(2024, 6, 9, 15, 0);
        let loc = new_location("  Calanques ", 4, photo("first", t), &t, &Utc);
        assert_eq!(loc.name, "Calanques");
        assert_eq!(loc.current_visits, 1);
        assert_eq!(loc.visit_goal, 4);
        assert_eq!(loc.week_start_date, date(2024, 6, 3));
        assert_eq!(loc.latitude, 43.2965);
        assert_eq!(loc.photos.len(), 1);
        assert_eq!(weekly_progress(&loc).completion_percentage, 25.0);
    }

    #[test]
    fn test_no_goal_is_zero_percent() {
        for visits in [0, 1, 12] {
            let p = weekly_progress(&location(0, visits, date(2024, 6, 3)));
            assert_eq!(p.completion_percentage, 0.0);
            assert_eq!(p.actual_visits, visits);
            assert_eq!(p.target_visits, 0);
        }
    }

    #[test]
    fn test_progress_is_not_clamped() {
        let p = weekly_progress(&location(2, 5, date(2024, 6, 3)));
        assert_eq!(p.completion_percentage, 250.0);
        assert_eq!(p.location_id, "vieux-port");
        assert_eq!(p.week_start_date, date(2024, 6, 3));
    }
}
