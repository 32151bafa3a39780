use crate::error::AppError;
use photo_gallery::SqliteKeyValueStore;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Default database location inside the app data directory
pub fn default_database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("gallery.db")
}

/// Opens the database, creating its directory if needed
pub fn init_database(db_path: &Path) -> Result<Connection, AppError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    log::debug!("Opened database {:?}", db_path);
    Ok(conn)
}

/// Key-value store backing the photo cache
pub fn open_key_value_store(db_path: &Path) -> Result<SqliteKeyValueStore, AppError> {
    let conn = init_database(db_path)?;
    Ok(SqliteKeyValueStore::new(conn)?)
}
