use serde::{Deserialize, Serialize};

/// Cache key the ordered photo list is stored under
pub const DEFAULT_CACHE_KEY: &str = "photos";
/// Extension of generated file names; stored blobs are always JPEG
pub const PHOTO_FILE_EXTENSION: &str = "jpeg";
/// Origin that native file URIs are served from inside the webview
pub const DEFAULT_DISPLAY_ORIGIN: &str = "https://localhost/_app_file_";
/// Camera quality for captures (maximum, no recompression)
pub const CAPTURE_QUALITY: u8 = 100;

/// A saved photo
///
/// `filepath` is the durable storage reference. `display_path` is only valid
/// for the running session and is serialized as `webviewPath`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    pub filepath: String,
    #[serde(
        rename = "webviewPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_path: Option<String>,
}

impl Photo {
    pub fn new(filepath: impl Into<String>, display_path: Option<String>) -> Self {
        Self {
            filepath: filepath.into(),
            display_path,
        }
    }
}

/// Runtime environment the gallery runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// Direct filesystem access through the platform bridge
    #[serde(rename = "native")]
    NativeBridge,
    /// Only network and blob references are available
    #[serde(rename = "browser")]
    Browser,
}

impl Platform {
    /// Platform implied by the compile target
    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Platform::Browser
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Platform::NativeBridge
        }
    }
}

/// Where the camera should take the picture from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    Camera,
    Photos,
}

/// Options passed to [`crate::Camera::get_photo`]
///
/// Results are always returned as references (path or web path), never inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraOptions {
    pub source: CameraSource,
    pub quality: u8,
}

impl CameraOptions {
    /// Full-quality capture from the device camera
    pub fn capture() -> Self {
        Self {
            source: CameraSource::Camera,
            quality: CAPTURE_QUALITY,
        }
    }
}

/// Transient result of a camera call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraPhoto {
    /// Platform file path (native bridge)
    pub path: Option<String>,
    /// Resource reference loadable by the webview (browser blob URL)
    pub web_path: Option<String>,
}

/// Handle returned by a filesystem write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub uri: String,
}

/// Fixed storage partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    /// Application-private data directory
    Data,
}

/// Configuration for photo gallery initialization
#[derive(Debug, Clone)]
pub struct PhotoGalleryConfig {
    /// Base directory backing [`Directory::Data`]
    pub storage_path: String,
    pub cache_key: String,
    pub display_origin: String,
    pub platform: Platform,
}

impl Default for PhotoGalleryConfig {
    fn default() -> Self {
        Self {
            storage_path: String::new(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            display_origin: DEFAULT_DISPLAY_ORIGIN.to_string(),
            platform: Platform::detect(),
        }
    }
}
