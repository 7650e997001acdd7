//! SQLite-backed key-value storage.
//!
//! Holds two independent records:
//! - the progress record (whole-record overwrite on every completion)
//! - the opaque push subscription, reused across sessions

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::warn;

use super::data_dir;
use super::store::{ProgressStore, PROGRESS_KEY, SUBSCRIPTION_KEY};
use crate::error::{DatabaseError, Result};
use crate::progress::{codec, Progress};

/// SQLite database for application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/pomoquest.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("pomoquest.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Missing keys are not an error.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Stored push subscription, if one was registered and is valid JSON.
    pub fn push_subscription(&self) -> Result<Option<serde_json::Value>> {
        let Some(raw) = self.kv_get(SUBSCRIPTION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(error = %e, "stored push subscription is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    pub fn set_push_subscription(&self, subscription: &serde_json::Value) -> Result<()> {
        self.kv_set(SUBSCRIPTION_KEY, &serde_json::to_string(subscription)?)?;
        Ok(())
    }

    pub fn clear_push_subscription(&self) -> Result<()> {
        self.kv_delete(SUBSCRIPTION_KEY)?;
        Ok(())
    }
}

impl ProgressStore for Database {
    fn load(&self) -> Progress {
        match self.kv_get(PROGRESS_KEY) {
            Ok(raw) => codec::decode_or_default(raw.as_deref()),
            Err(e) => {
                warn!(error = %e, "failed to read progress, starting from zero");
                Progress::default()
            }
        }
    }

    fn save(&self, progress: &Progress) -> Result<()> {
        self.kv_set(PROGRESS_KEY, &codec::encode(progress)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn progress_round_trips_through_kv() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.load(), Progress::default());

        let mut progress = Progress::default();
        progress.total_break = 7;
        progress.break_by_mode.junior = 7;
        db.save(&progress).unwrap();
        assert_eq!(db.load(), progress);
    }

    #[test]
    fn corrupt_progress_loads_default() {
        let db = Database::open_memory().unwrap();
        db.kv_set(PROGRESS_KEY, "[1,2,3]").unwrap();
        assert_eq!(db.load(), Progress::default());
    }

    #[test]
    fn subscription_is_stored_independently() {
        let db = Database::open_memory().unwrap();
        assert!(db.push_subscription().unwrap().is_none());

        let sub = serde_json::json!({
            "endpoint": "https://push.example.com/abc",
            "keys": { "p256dh": "key", "auth": "secret" }
        });
        db.set_push_subscription(&sub).unwrap();
        db.save(&Progress::default()).unwrap();
        assert_eq!(db.push_subscription().unwrap(), Some(sub));

        db.clear_push_subscription().unwrap();
        assert!(db.push_subscription().unwrap().is_none());
        assert!(db.kv_get(PROGRESS_KEY).unwrap().is_some());
    }
}
