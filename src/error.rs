use photo_gallery::PhotoGalleryError;
use std::fmt;

/// Central error types for the gallery app
#[derive(Debug)]
pub enum AppError {
    /// Database error (rusqlite)
    Database(rusqlite::Error),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Configuration file could not be parsed
    Config(toml::de::Error),
    /// Error from a gallery operation
    Gallery(PhotoGalleryError),
    /// Validation error (e.g. invalid command line)
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Gallery(e) => write!(f, "{}", e),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e)
    }
}

impl From<PhotoGalleryError> for AppError {
    fn from(e: PhotoGalleryError) -> Self {
        AppError::Gallery(e)
    }
}

/// User-friendly error messages
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred. Please try again.".to_string(),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Config(_) => "The configuration file is invalid.".to_string(),
            AppError::Gallery(PhotoGalleryError::PermissionDenied(msg)) => {
                format!("Permission required: {}", msg)
            }
            AppError::Gallery(PhotoGalleryError::CapabilityUnavailable(msg)) => msg.clone(),
            AppError::Gallery(PhotoGalleryError::MalformedCache(_)) => {
                "Saved photo list is damaged and could not be loaded.".to_string()
            }
            AppError::Gallery(_) => "The photo could not be processed.".to_string(),
            AppError::Validation(msg) => msg.clone(),
        }
    }
}
