/// Error type for photo gallery operations
#[derive(Debug)]
pub enum PhotoGalleryError {
    /// Capability missing, refused, or called without the reference it needs
    CapabilityUnavailable(String),
    PermissionDenied(String),
    Io(std::io::Error),
    Fetch(String),
    Database(rusqlite::Error),
    Storage(String),
    MalformedCache(serde_json::Error),
    Encoding(String),
}

/// Result alias used across the crate
pub type GalleryResult<T> = Result<T, PhotoGalleryError>;

impl PhotoGalleryError {
    /// True when the referenced file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, PhotoGalleryError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl std::fmt::Display for PhotoGalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoGalleryError::CapabilityUnavailable(msg) => {
                write!(f, "Capability unavailable: {}", msg)
            }
            PhotoGalleryError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PhotoGalleryError::Io(e) => write!(f, "IO error: {}", e),
            PhotoGalleryError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            PhotoGalleryError::Database(e) => write!(f, "Database error: {}", e),
            PhotoGalleryError::Storage(msg) => write!(f, "Storage error: {}", msg),
            PhotoGalleryError::MalformedCache(e) => write!(f, "Malformed photo cache: {}", e),
            PhotoGalleryError::Encoding(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for PhotoGalleryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhotoGalleryError::Io(e) => Some(e),
            PhotoGalleryError::Database(e) => Some(e),
            PhotoGalleryError::MalformedCache(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PhotoGalleryError {
    fn from(err: std::io::Error) -> Self {
        PhotoGalleryError::Io(err)
    }
}

impl From<rusqlite::Error> for PhotoGalleryError {
    fn from(err: rusqlite::Error) -> Self {
        PhotoGalleryError::Database(err)
    }
}

impl From<serde_json::Error> for PhotoGalleryError {
    fn from(err: serde_json::Error) -> Self {
        PhotoGalleryError::MalformedCache(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let missing = PhotoGalleryError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(missing.is_not_found());

        let denied =
            PhotoGalleryError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!denied.is_not_found());
        assert!(!PhotoGalleryError::Fetch("offline".into()).is_not_found());
    }
}
