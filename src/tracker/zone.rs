use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Anything that can turn an instant into a wall-clock reading.
///
/// All calendar bucketing goes through this: a photo taken at 23:30 UTC
/// belongs to the next day for a traveller in Paris.
pub trait LocalZone {
    fn local_datetime(&self, instant: &DateTime<Utc>) -> NaiveDateTime;

    fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.local_datetime(instant).date()
    }
}

impl<Tz: TimeZone> LocalZone for Tz {
    fn local_datetime(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(self).naive_local()
    }
}

/// Zone picked from config: the system zone, or a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JournalZone {
    System,
    Fixed(FixedOffset),
}

impl JournalZone {
    /// `None` selects the system zone; otherwise minutes east of UTC.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Result<Self> {
        match minutes {
            None => Ok(JournalZone::System),
            Some(m) => FixedOffset::east_opt(m * 60)
                .map(JournalZone::Fixed)
                .ok_or_else(|| anyhow!("Timezone offset out of range: {} minutes", m)),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.local_date(&Utc::now())
    }
}

impl LocalZone for JournalZone {
    fn local_datetime(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            JournalZone::System => Local.local_datetime(instant),
            JournalZone::Fixed(offset) => offset.local_datetime(instant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_offset_moves_late_evening_to_next_day() {
        let zone = JournalZone::from_offset_minutes(Some(120)).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 23, 30, 0).unwrap();
        assert_eq!(
            zone.local_date(&instant),
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
        );
        assert_eq!(Utc.local_date(&instant), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_negative_offset() {
        let zone = JournalZone::from_offset_minutes(Some(-300)).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 6, 2, 3, 0, 0).unwrap();
        assert_eq!(
            zone.local_date(&instant),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(JournalZone::from_offset_minutes(Some(24 * 60)).is_err());
        assert_eq!(
            JournalZone::from_offset_minutes(None).unwrap(),
            JournalZone::System
        );
    }
}
