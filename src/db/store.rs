use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Location, Photo};
use crate::tracker::{photos_on_date, LocalZone};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed journal file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt record '{id}': {reason}")]
    Corrupt { id: String, reason: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub trait PhotoStore {
    /// All photos, newest first.
    fn get_photos(&self) -> StoreResult<Vec<Photo>>;

    /// Same result as filtering `get_photos()` by local calendar day.
    fn get_photos_by_date(&self, date: NaiveDate, zone: &impl LocalZone) -> StoreResult<Vec<Photo>> {
        Ok(photos_on_date(&self.get_photos()?, date, zone))
    }

    fn save_photo(&mut self, photo: &Photo) -> StoreResult<()>;

    /// Removes the photo and unlinks it from any location. Visit counts are
    /// left alone. Returns false if no such photo existed.
    fn delete_photo(&mut self, id: &str) -> StoreResult<bool>;
}

pub trait LocationStore {
    /// All locations with their photos, ordered by name.
    fn get_locations(&self) -> StoreResult<Vec<Location>>;

    fn find_location_by_name(&self, name: &str) -> StoreResult<Option<Location>> {
        let locations = self.get_locations()?;
        Ok(locations.into_iter().find(|l| l.matches_name(name)))
    }

    /// Insert or replace, photo links included.
    fn save_location(&mut self, location: &Location) -> StoreResult<()>;
}

pub trait Store: PhotoStore + LocationStore {
    fn clear_all(&mut self) -> StoreResult<()>;
}
