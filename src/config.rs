use crate::database::default_database_path;
use crate::error::AppError;
use photo_gallery::models::{DEFAULT_CACHE_KEY, DEFAULT_DISPLAY_ORIGIN};
use photo_gallery::{PhotoGalleryConfig, Platform};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the app data directory
pub const CONFIG_FILE: &str = "gallery.toml";

/// Settings read from `gallery.toml`; every key is optional
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Photo directory, defaults to `<data dir>/photos`
    pub storage_path: Option<String>,
    /// SQLite file, defaults to `<data dir>/gallery.db`
    pub database_path: Option<String>,
    pub cache_key: String,
    pub display_origin: String,
    /// Runtime environment, detected from the build target when unset
    pub platform: Option<Platform>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            database_path: None,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            display_origin: DEFAULT_DISPLAY_ORIGIN.to_string(),
            platform: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads the file at `path`; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&raw)?)
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        self.database_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_database_path(data_dir))
    }

    /// Configured platform, or the one detected from the build target
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }

    pub fn gallery_config(&self, data_dir: &Path) -> PhotoGalleryConfig {
        let storage_path = self
            .storage_path
            .clone()
            .unwrap_or_else(|| data_dir.join("photos").to_string_lossy().into_owned());

        PhotoGalleryConfig {
            storage_path,
            cache_key: self.cache_key.clone(),
            display_origin: self.display_origin.clone(),
            platform: self.platform(),
        }
    }
}
