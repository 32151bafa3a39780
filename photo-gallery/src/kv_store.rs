use crate::capabilities::{CapabilityFuture, KeyValueStore};
use crate::error::GalleryResult;
use crate::schema::init_kv_schema;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value capability stored in a SQLite table
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps an open connection, creating the table if needed
    pub fn new(conn: Connection) -> GalleryResult<Self> {
        init_kv_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open(path: impl AsRef<Path>) -> GalleryResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::new(Connection::open(path)?)
    }

    fn get_sync(&self, key: &str) -> GalleryResult<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn set_sync(&self, key: &str, value: &str) -> GalleryResult<()> {
        self.conn.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> CapabilityFuture<'a, GalleryResult<()>> {
        Box::pin(async move { self.set_sync(key, value) })
    }

    fn get<'a>(&'a self, key: &'a str) -> CapabilityFuture<'a, GalleryResult<Option<String>>> {
        Box::pin(async move { self.get_sync(key) })
    }
}
