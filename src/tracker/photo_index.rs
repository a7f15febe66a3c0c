use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeSet;

use crate::models::{Photo, PhotoStats};
use crate::tracker::week::{first_of_month, week_start};
use crate::tracker::zone::LocalZone;

/// Local calendar day a photo was taken on.
pub fn date_key(photo: &Photo, zone: &impl LocalZone) -> NaiveDate {
    zone.local_date(&photo.timestamp)
}

/// Every day that has at least one photo.
pub fn index_by_date(photos: &[Photo], zone: &impl LocalZone) -> BTreeSet<NaiveDate> {
    photos.iter().map(|p| date_key(p, zone)).collect()
}

/// Photos taken on `date`, in the order they were given.
pub fn photos_on_date(photos: &[Photo], date: NaiveDate, zone: &impl LocalZone) -> Vec<Photo> {
    photos
        .iter()
        .filter(|p| date_key(p, zone) == date)
        .cloned()
        .collect()
}

/// Counts for today, this week (since Monday 00:00) and this month (since
/// the 1st, 00:00). A photo from today lands in all three.
pub fn stats_for(photos: &[Photo], now: &DateTime<Utc>, zone: &impl LocalZone) -> PhotoStats {
    let today = zone.local_date(now);
    let week_from = week_start(now, zone).and_time(NaiveTime::MIN);
    let month_from = first_of_month(now, zone).and_time(NaiveTime::MIN);

    let mut stats = PhotoStats::default();
    for photo in photos {
        let local = zone.local_datetime(&photo.timestamp);
        if local.date() == today {
            stats.today += 1;
        }
        if local >= week_from {
            stats.this_week += 1;
        }
        if local >= month_from {
            stats.this_month += 1;
        }
    }
    stats
}

// ─── Month grid ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub has_photos: bool,
}

/// One row per Monday-first week; `None` pads days outside the month.
pub type MonthGrid = Vec<[Option<CalendarCell>; 7]>;

/// Lay out the month containing `any_day` for calendar highlighting.
pub fn month_grid(any_day: NaiveDate, index: &BTreeSet<NaiveDate>) -> MonthGrid {
    let first = any_day - Duration::days(any_day.day0() as i64);
    let mut rows: MonthGrid = Vec::new();
    let mut row: [Option<CalendarCell>; 7] = [None; 7];
    let mut day = first;

    while day.month() == first.month() {
        let col = day.weekday().num_days_from_monday() as usize;
        row[col] = Some(CalendarCell {
            date: day,
            has_photos: index.contains(&day),
        });
        if col == 6 {
            rows.push(row);
            row = [None; 7];
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    if row.iter().any(Option::is_some) {
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn photo(id: &str, y: i32, m: u32, d: u32, h: u32, min: u32) -> Photo {
        Photo {
            id: id.to_string(),
            uri: format!("file:///dcim/{}.jpg", id),
            latitude: 0.0,
            longitude: 0.0,
            timestamp: Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap(),
            location_name: None,
            description: None,
        }
    }

    fn ids(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_index() {
        assert!(index_by_date(&[], &Utc).is_empty());
    }

    #[test]
    fn test_same_day_collapses() {
        let photos = vec![
            photo("a", 2024, 6, 1, 0, 0),
            photo("b", 2024, 6, 1, 12, 0),
            photo("c", 2024, 6, 1, 23, 59),
        ];
        let index = index_by_date(&photos, &Utc);
        assert_eq!(index.len(), 1);
        assert!(index.contains(&date(2024, 6, 1)));
    }

    #[test]
    fn test_bucketing_scenario() {
        let photos = vec![
            photo("p1", 2024, 6, 1, 10, 0),
            photo("p2", 2024, 6, 1, 23, 0),
            photo("p3", 2024, 6, 2, 0, 1),
        ];
        let index = index_by_date(&photos, &Utc);
        assert_eq!(
            index.into_iter().collect::<Vec<_>>(),
            vec![date(2024, 6, 1), date(2024, 6, 2)]
        );
        let on_first = photos_on_date(&photos, date(2024, 6, 1), &Utc);
        assert_eq!(ids(&on_first), vec!["p1", "p2"]);
    }

    #[test]
    fn test_photos_on_date_keeps_input_order() {
        let photos = vec![
            photo("late", 2024, 6, 1, 22, 0),
            photo("other", 2024, 6, 3, 9, 0),
            photo("early", 2024, 6, 1, 6, 0),
        ];
        let on_day = photos_on_date(&photos, date(2024, 6, 1), &Utc);
        assert_eq!(ids(&on_day), vec!["late", "early"]);
    }

    #[test]
    fn test_photos_on_date_is_idempotent() {
        let photos = vec![
            photo("a", 2024, 6, 1, 10, 0),
            photo("b", 2024, 6, 2, 10, 0),
            photo("c", 2024, 6, 1, 11, 0),
        ];
        let once = photos_on_date(&photos, date(2024, 6, 1), &Utc);
        let twice = photos_on_date(&once, date(2024, 6, 1), &Utc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_bucketing_follows_zone() {
        let photos = vec![photo("a", 2024, 6, 1, 23, 0)];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(date_key(&photos[0], &Utc), date(2024, 6, 1));
        assert_eq!(date_key(&photos[0], &tokyo), date(2024, 6, 2));
        assert!(photos_on_date(&photos, date(2024, 6, 1), &tokyo).is_empty());
    }

    #[test]
    fn test_stats_buckets_overlap() {
        // now: Wednesday 2024-06-12 15:00
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 0, 0).unwrap();
        let photos = vec![
            photo("today", 2024, 6, 12, 8, 0),
            photo("monday", 2024, 6, 10, 0, 0),
            photo("last-sunday", 2024, 6, 9, 23, 59),
            photo("first", 2024, 6, 1, 0, 0),
            photo("may", 2024, 5, 31, 23, 59),
        ];
        let stats = stats_for(&photos, &now, &Utc);
        assert_eq!(
            stats,
            PhotoStats {
                today: 1,
                this_week: 2,
                this_month: 4,
            }
        );
    }

    #[test]
    fn test_stats_empty() {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 0, 0).unwrap();
        assert_eq!(stats_for(&[], &now, &Utc), PhotoStats::default());
    }

    #[test]
    fn test_month_grid_june_2024() {
        let index: BTreeSet<_> = [date(2024, 6, 1), date(2024, 6, 30)].into_iter().collect();
        let grid = month_grid(date(2024, 6, 17), &index);
        // June 2024 starts on a Saturday and ends on a Sunday
        assert_eq!(grid.len(), 5);
        assert!(grid[0][..5].iter().all(Option::is_none));
        assert_eq!(
            grid[0][5],
            Some(CalendarCell {
                date: date(2024, 6, 1),
                has_photos: true
            })
        );
        assert_eq!(grid[0][6].map(|c| c.has_photos), Some(false));
        assert_eq!(grid[4][6].map(|c| c.date), Some(date(2024, 6, 30)));
        let cells = grid.iter().flatten().flatten().count();
        assert_eq!(cells, 30);
    }

    #[test]
    fn test_month_grid_trailing_partial_week() {
        // February 2024: Thursday 1st to Thursday 29th
        let grid = month_grid(date(2024, 2, 1), &BTreeSet::new());
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[4][3].map(|c| c.date), Some(date(2024, 2, 29)));
        assert!(grid[4][4..].iter().all(Option::is_none));
    }
}
