use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Params};
use std::path::Path;

use crate::db::migrations::run_migrations;
use crate::db::store::{LocationStore, PhotoStore, Store, StoreError, StoreResult};
use crate::models::{sort_by_name, Location, Photo};
use crate::tracker::{photos_on_date, LocalZone};

const DATE_FORMAT: &str = "%Y-%m-%d";

// Widest UTC offset in use anywhere, either side.
const MAX_ZONE_SKEW_HOURS: i64 = 14;

// ─── Row conversion ──────────────────────────────────────────────────────────

/// Fixed-width UTC form, so string order is time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(id: &str, s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt {
            id: id.to_string(),
            reason: format!("bad timestamp '{}': {}", s, e),
        })
}

fn parse_date(id: &str, s: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| StoreError::Corrupt {
        id: id.to_string(),
        reason: format!("bad date '{}': {}", s, e),
    })
}

type PhotoRow = (String, String, f64, f64, String, Option<String>, Option<String>);

fn read_photo_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PhotoRow> {
    Ok((
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, f64>(2)?,
        row.get::<_, f64>(3)?,
        row.get::<_, String>(4)?,
        row.get::<_, Option<String>>(5)?,
        row.get::<_, Option<String>>(6)?,
    ))
}

fn photo_from_row(row: PhotoRow) -> StoreResult<Photo> {
    let (id, uri, latitude, longitude, timestamp, location_name, description) = row;
    let timestamp = parse_timestamp(&id, &timestamp)?;
    Ok(Photo {
        id,
        uri,
        latitude,
        longitude,
        timestamp,
        location_name,
        description,
    })
}

fn query_photos<P: Params>(conn: &Connection, sql: &str, params: P) -> StoreResult<Vec<Photo>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_photo_row)?;

    let mut result = Vec::new();
    for r in rows {
        result.push(photo_from_row(r?)?);
    }
    Ok(result)
}

fn insert_photo(conn: &Connection, photo: &Photo) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO photos (id, uri, latitude, longitude, timestamp, location_name, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET location_name = ?6, description = ?7",
        params![
            photo.id,
            photo.uri,
            photo.latitude,
            photo.longitude,
            format_timestamp(&photo.timestamp),
            photo.location_name,
            photo.description,
        ],
    )?;
    Ok(())
}

// ─── SQLite store ────────────────────────────────────────────────────────────

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    fn photos_for_location(&self, location_id: &str) -> StoreResult<Vec<Photo>> {
        query_photos(
            &self.conn,
            "SELECT p.id, p.uri, p.latitude, p.longitude, p.timestamp, p.location_name, p.description
             FROM photos p
             INNER JOIN location_photos lp ON p.id = lp.photo_id
             WHERE lp.location_id = ?1
             ORDER BY lp.position",
            params![location_id],
        )
    }
}

impl PhotoStore for SqliteStore {
    fn get_photos(&self) -> StoreResult<Vec<Photo>> {
        query_photos(
            &self.conn,
            "SELECT id, uri, latitude, longitude, timestamp, location_name, description
             FROM photos ORDER BY timestamp DESC",
            [],
        )
    }

    /// Narrows to a UTC window wide enough for any zone, then buckets exactly.
    fn get_photos_by_date(&self, date: NaiveDate, zone: &impl LocalZone) -> StoreResult<Vec<Photo>> {
        let from = date.and_time(NaiveTime::MIN).and_utc() - Duration::hours(MAX_ZONE_SKEW_HOURS);
        let to = from + Duration::hours(24 + 2 * MAX_ZONE_SKEW_HOURS);
        let candidates = query_photos(
            &self.conn,
            "SELECT id, uri, latitude, longitude, timestamp, location_name, description
             FROM photos WHERE timestamp >= ?1 AND timestamp < ?2
             ORDER BY timestamp DESC",
            params![format_timestamp(&from), format_timestamp(&to)],
        )?;
        Ok(photos_on_date(&candidates, date, zone))
    }

    fn save_photo(&mut self, photo: &Photo) -> StoreResult<()> {
        insert_photo(&self.conn, photo)?;
        log::debug!("Saved photo {}", photo.id);
        Ok(())
    }

    fn delete_photo(&mut self, id: &str) -> StoreResult<bool> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM location_photos WHERE photo_id = ?1", params![id])?;
        let removed = tx.execute("DELETE FROM photos WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(removed > 0)
    }
}

impl LocationStore for SqliteStore {
    fn get_locations(&self) -> StoreResult<Vec<Location>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, latitude, longitude, description, visit_goal, current_visits, week_start_date
             FROM locations",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, u32>(5)?,
                row.get::<_, u32>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, name, latitude, longitude, description, visit_goal, current_visits, week) = r?;
            let week_start_date = parse_date(&id, &week)?;
            let photos = self.photos_for_location(&id)?;
            result.push(Location {
                id,
                name,
                latitude,
                longitude,
                description,
                visit_goal,
                current_visits,
                week_start_date,
                photos,
            });
        }
        sort_by_name(&mut result);
        Ok(result)
    }

    fn save_location(&mut self, location: &Location) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO locations
                (id, name, latitude, longitude, description, visit_goal, current_visits, week_start_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                name = ?2, description = ?5, visit_goal = ?6,
                current_visits = ?7, week_start_date = ?8",
            params![
                location.id,
                location.name,
                location.latitude,
                location.longitude,
                location.description,
                location.visit_goal,
                location.current_visits,
                location.week_start_date.format(DATE_FORMAT).to_string(),
            ],
        )?;

        tx.execute(
            "DELETE FROM location_photos WHERE location_id = ?1",
            params![location.id],
        )?;
        for (position, photo) in location.photos.iter().enumerate() {
            insert_photo(&tx, photo)?;
            tx.execute(
                "INSERT OR IGNORE INTO location_photos (location_id, photo_id, position)
                 VALUES (?1, ?2, ?3)",
                params![location.id, photo.id, position as i64],
            )?;
        }
        tx.commit()?;
        log::debug!(
            "Saved location '{}' ({} visits, {} photos)",
            location.name,
            location.current_visits,
            location.photos.len()
        );
        Ok(())
    }
}

impl Store for SqliteStore {
    fn clear_all(&mut self) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM location_photos", [])?;
        tx.execute("DELETE FROM photos", [])?;
        tx.execute("DELETE FROM locations", [])?;
        tx.commit()?;
        Ok(())
    }
}
