use rusqlite::Connection;

use crate::db::store::StoreResult;

pub fn run_migrations(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS photos (
            id             TEXT PRIMARY KEY,
            uri            TEXT NOT NULL,
            latitude       REAL NOT NULL DEFAULT 0,
            longitude      REAL NOT NULL DEFAULT 0,
            timestamp      TEXT NOT NULL,
            location_name  TEXT,
            description    TEXT,
            created_at     TEXT DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_photos_timestamp ON photos(timestamp);

        CREATE TABLE IF NOT EXISTS locations (
            id               TEXT PRIMARY KEY,
            name             TEXT NOT NULL,
            latitude         REAL NOT NULL,
            longitude        REAL NOT NULL,
            description      TEXT,
            visit_goal       INTEGER NOT NULL DEFAULT 0 CHECK(visit_goal >= 0),
            current_visits   INTEGER NOT NULL DEFAULT 0 CHECK(current_visits >= 0),
            week_start_date  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS location_photos (
            location_id  TEXT NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
            photo_id     TEXT NOT NULL REFERENCES photos(id) ON DELETE CASCADE,
            position     INTEGER NOT NULL,
            PRIMARY KEY (location_id, photo_id)
        );
    ")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('photos', 'locations', 'location_photos')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }
}
