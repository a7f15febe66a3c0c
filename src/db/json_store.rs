use std::fs;
use std::path::{Path, PathBuf};

use crate::db::store::{LocationStore, PhotoStore, Store, StoreError, StoreResult};
use crate::models::{sort_by_name, JournalExport, Location, Photo};

/// Whole journal in one JSON document, rewritten on every change.
///
/// Locations embed full copies of their photos, mirroring the key-value
/// layout phones use for offline storage.
pub struct JsonStore {
    path: PathBuf,
    data: JournalExport,
}

impl JsonStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if content.trim().is_empty() {
                JournalExport::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            JournalExport::default()
        };
        log::debug!(
            "Opened {:?}: {} photos, {} locations",
            path,
            data.photos.len(),
            data.locations.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Write to a sibling temp file, then rename over the original.
    fn persist(&self) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&tmp, content).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl PhotoStore for JsonStore {
    fn get_photos(&self) -> StoreResult<Vec<Photo>> {
        let mut photos = self.data.photos.clone();
        photos.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(photos)
    }

    fn save_photo(&mut self, photo: &Photo) -> StoreResult<()> {
        match self.data.photos.iter_mut().find(|p| p.id == photo.id) {
            Some(existing) => *existing = photo.clone(),
            None => self.data.photos.push(photo.clone()),
        }
        self.persist()?;
        log::debug!("Saved photo {}", photo.id);
        Ok(())
    }

    fn delete_photo(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.data.photos.len();
        self.data.photos.retain(|p| p.id != id);
        let removed = self.data.photos.len() != before;
        for location in &mut self.data.locations {
            location.photos.retain(|p| p.id != id);
        }
        self.persist()?;
        Ok(removed)
    }
}

impl LocationStore for JsonStore {
    fn get_locations(&self) -> StoreResult<Vec<Location>> {
        let mut locations = self.data.locations.clone();
        sort_by_name(&mut locations);
        Ok(locations)
    }

    fn save_location(&mut self, location: &Location) -> StoreResult<()> {
        for photo in &location.photos {
            if !self.data.photos.iter().any(|p| p.id == photo.id) {
                self.data.photos.push(photo.clone());
            }
        }
        match self.data.locations.iter_mut().find(|l| l.id == location.id) {
            Some(existing) => *existing = location.clone(),
            None => self.data.locations.push(location.clone()),
        }
        self.persist()?;
        log::debug!(
            "Saved location '{}' ({} visits, {} photos)",
            location.name,
            location.current_visits,
            location.photos.len()
        );
        Ok(())
    }
}

impl Store for JsonStore {
    fn clear_all(&mut self) -> StoreResult<()> {
        self.data = JournalExport::default();
        self.persist()
    }
}
