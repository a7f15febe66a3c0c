use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

use crate::db::Store;
use crate::models::{CaptureEvent, JournalExport, Location, Photo, PhotoStats, WeeklyProgress};
use crate::tracker::{
    index_by_date, month_grid, new_location, record_visit, stats_for, weekly_progress,
    JournalZone, MonthGrid,
};

/// A capture plus what the user typed in the save dialog.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub event: CaptureEvent,
    pub place: Option<String>,
    /// Only used when the place is new.
    pub visit_goal: Option<u32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisitOutcome {
    /// First photo at a newly named place.
    Created(Location),
    Visited { location: Location, rolled_over: bool },
    /// Saved without a place: none was given, or a new place had no fix.
    Loose,
}

#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub photo: Photo,
    pub visit: VisitOutcome,
}

pub struct Journal<S: Store> {
    store: S,
    zone: JournalZone,
    default_visit_goal: u32,
}

impl<S: Store> Journal<S> {
    pub fn new(store: S, zone: JournalZone, default_visit_goal: u32) -> Self {
        Self {
            store,
            zone,
            default_visit_goal,
        }
    }

    pub fn zone(&self) -> &JournalZone {
        &self.zone
    }

    pub fn today(&self) -> NaiveDate {
        self.zone.today()
    }

    // ─── Capture ────────────────────────────────────────────────────────────

    /// Save a photo and, when it names a place, count a visit there at `now`.
    /// A place is only created from a photo with a real location fix.
    pub fn capture(&mut self, request: CaptureRequest, now: DateTime<Utc>) -> Result<CaptureOutcome> {
        let place = request
            .place
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let photo = Photo::from_capture(&request.event, place.clone(), request.description);
        self.store.save_photo(&photo).context("Saving photo")?;
        log::info!("Saved photo {} ({})", photo.id, photo.uri);

        let Some(name) = place else {
            return Ok(CaptureOutcome {
                photo,
                visit: VisitOutcome::Loose,
            });
        };

        let existing = self
            .store
            .find_location_by_name(&name)
            .with_context(|| format!("Looking up place '{}'", name))?;

        let visit = match existing {
            Some(location) => {
                if request.visit_goal.is_some() {
                    log::debug!("Ignoring visit goal for existing place '{}'", location.name);
                }
                let previous_week = location.week_start_date;
                let location = record_visit(location, photo.clone(), &now, &self.zone);
                let rolled_over = location.week_start_date != previous_week;
                self.store
                    .save_location(&location)
                    .with_context(|| format!("Saving place '{}'", location.name))?;
                log::info!(
                    "Visit {} to '{}' this week",
                    location.current_visits,
                    location.name
                );
                VisitOutcome::Visited {
                    location,
                    rolled_over,
                }
            }
            None if !request.event.has_fix() => {
                log::warn!(
                    "Photo {} has no location fix; not creating place '{}'",
                    photo.id,
                    name
                );
                VisitOutcome::Loose
            }
            None => {
                let goal = request.visit_goal.unwrap_or(self.default_visit_goal);
                let location = new_location(&name, goal, photo.clone(), &now, &self.zone);
                self.store
                    .save_location(&location)
                    .with_context(|| format!("Saving place '{}'", location.name))?;
                log::info!("New place '{}' (goal {}/week)", location.name, goal);
                VisitOutcome::Created(location)
            }
        };

        Ok(CaptureOutcome { photo, visit })
    }

    // ─── Places ─────────────────────────────────────────────────────────────

    pub fn locations(&self) -> Result<Vec<Location>> {
        self.store.get_locations().context("Loading places")
    }

    /// Every place paired with its progress for the week it is tracking.
    pub fn weekly_progress(&self) -> Result<Vec<(Location, WeeklyProgress)>> {
        Ok(self
            .locations()?
            .into_iter()
            .map(|l| {
                let progress = weekly_progress(&l);
                (l, progress)
            })
            .collect())
    }

    pub fn goals_met(&self) -> Result<usize> {
        Ok(self.locations()?.iter().filter(|l| l.goal_met()).count())
    }

    // ─── Photos & calendar ──────────────────────────────────────────────────

    pub fn photos(&self) -> Result<Vec<Photo>> {
        self.store.get_photos().context("Loading photos")
    }

    pub fn photos_on(&self, date: NaiveDate) -> Result<Vec<Photo>> {
        self.store
            .get_photos_by_date(date, &self.zone)
            .with_context(|| format!("Loading photos for {}", date))
    }

    pub fn photo_dates(&self) -> Result<BTreeSet<NaiveDate>> {
        Ok(index_by_date(&self.photos()?, &self.zone))
    }

    pub fn month(&self, any_day: NaiveDate) -> Result<MonthGrid> {
        Ok(month_grid(any_day, &self.photo_dates()?))
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Result<PhotoStats> {
        Ok(stats_for(&self.photos()?, &now, &self.zone))
    }

    // ─── Maintenance ────────────────────────────────────────────────────────

    pub fn delete_photo(&mut self, id: &str) -> Result<bool> {
        let removed = self
            .store
            .delete_photo(id)
            .with_context(|| format!("Deleting photo {}", id))?;
        if removed {
            log::info!("Deleted photo {}", id);
        }
        Ok(removed)
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear_all().context("Clearing journal")?;
        log::info!("Cleared all photos and places");
        Ok(())
    }

    pub fn export(&self) -> Result<JournalExport> {
        Ok(JournalExport {
            photos: self.photos()?,
            locations: self.locations()?,
        })
    }
}
