//! Photo store adapters.
//!
//! [`PhotoStore`] hides how image bytes are resolved, written and displayed in
//! each runtime environment. One implementation is chosen at construction.

use crate::capabilities::{CapabilityFuture, Filesystem, ResourceFetcher};
use crate::codec::{encode_to_base64, jpeg_data_uri};
use crate::error::{GalleryResult, PhotoGalleryError};
use crate::models::{CameraPhoto, Directory, Photo, Platform, SavedFile};

/// Storage of photo bytes for one runtime environment
pub trait PhotoStore {
    fn platform(&self) -> Platform;

    /// Resolves a captured photo to base64 bytes
    fn fetch_bytes<'a>(
        &'a self,
        captured: &'a CameraPhoto,
    ) -> CapabilityFuture<'a, GalleryResult<String>>;

    /// Writes bytes under `file_name` in the data directory
    fn persist<'a>(
        &'a self,
        file_name: &'a str,
        base64_data: &'a str,
    ) -> CapabilityFuture<'a, GalleryResult<SavedFile>>;

    /// Deletes the blob behind `filepath`; any directory prefix is stripped
    fn remove<'a>(&'a self, filepath: &'a str) -> CapabilityFuture<'a, GalleryResult<()>>;

    /// Builds the record for a freshly persisted capture
    fn to_record(&self, file_name: &str, saved: &SavedFile, captured: &CameraPhoto) -> Photo;

    /// Prepares a record loaded from a previous session for display
    fn hydrate<'a>(&'a self, photo: Photo) -> CapabilityFuture<'a, GalleryResult<Photo>>;
}

/// Last path segment of a storage reference
pub fn bare_file_name(filepath: &str) -> &str {
    match filepath.rfind('/') {
        Some(idx) => &filepath[idx + 1..],
        None => filepath,
    }
}

/// Maps a native `file://` URI to a URL served by the webview at `origin`
///
/// References that are not local paths are returned unchanged.
pub fn convert_file_src(uri: &str, origin: &str) -> String {
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    if path.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), path)
    } else {
        uri.to_string()
    }
}

fn missing_reference(what: &str) -> PhotoGalleryError {
    PhotoGalleryError::CapabilityUnavailable(format!("Camera result has no {}", what))
}

/// Native bridge: camera output is a readable path and stored files are
/// addressed by their URI
pub struct NativePhotoStore<F> {
    fs: F,
    display_origin: String,
}

impl<F: Filesystem> NativePhotoStore<F> {
    pub fn new(fs: F, display_origin: impl Into<String>) -> Self {
        Self {
            fs,
            display_origin: display_origin.into(),
        }
    }
}

impl<F: Filesystem> PhotoStore for NativePhotoStore<F> {
    fn platform(&self) -> Platform {
        Platform::NativeBridge
    }

    fn fetch_bytes<'a>(
        &'a self,
        captured: &'a CameraPhoto,
    ) -> CapabilityFuture<'a, GalleryResult<String>> {
        Box::pin(async move {
            let path = captured.path.as_deref().ok_or_else(|| missing_reference("path"))?;
            self.fs.read_file(path, None).await
        })
    }

    fn persist<'a>(
        &'a self,
        file_name: &'a str,
        base64_data: &'a str,
    ) -> CapabilityFuture<'a, GalleryResult<SavedFile>> {
        self.fs.write_file(file_name, base64_data, Directory::Data)
    }

    fn remove<'a>(&'a self, filepath: &'a str) -> CapabilityFuture<'a, GalleryResult<()>> {
        self.fs.delete_file(bare_file_name(filepath), Directory::Data)
    }

    fn to_record(&self, _file_name: &str, saved: &SavedFile, _captured: &CameraPhoto) -> Photo {
        Photo::new(
            saved.uri.clone(),
            Some(convert_file_src(&saved.uri, &self.display_origin)),
        )
    }

    fn hydrate<'a>(&'a self, photo: Photo) -> CapabilityFuture<'a, GalleryResult<Photo>> {
        // Stored URIs stay valid across sessions; the cached display path is kept.
        Box::pin(async move { Ok(photo) })
    }
}

/// Browser: camera output is an ephemeral resource reference and stored files
/// are addressed by bare name
pub struct BrowserPhotoStore<F, R> {
    fs: F,
    fetcher: R,
}

impl<F: Filesystem, R: ResourceFetcher> BrowserPhotoStore<F, R> {
    pub fn new(fs: F, fetcher: R) -> Self {
        Self { fs, fetcher }
    }
}

impl<F: Filesystem, R: ResourceFetcher> PhotoStore for BrowserPhotoStore<F, R> {
    fn platform(&self) -> Platform {
        Platform::Browser
    }

    fn fetch_bytes<'a>(
        &'a self,
        captured: &'a CameraPhoto,
    ) -> CapabilityFuture<'a, GalleryResult<String>> {
        Box::pin(async move {
            let web_path = captured
                .web_path
                .as_deref()
                .ok_or_else(|| missing_reference("web path"))?;
            let blob = self.fetcher.fetch(web_path).await?;
            Ok(encode_to_base64(blob.as_slice()).await?)
        })
    }

    fn persist<'a>(
        &'a self,
        file_name: &'a str,
        base64_data: &'a str,
    ) -> CapabilityFuture<'a, GalleryResult<SavedFile>> {
        self.fs.write_file(file_name, base64_data, Directory::Data)
    }

    fn remove<'a>(&'a self, filepath: &'a str) -> CapabilityFuture<'a, GalleryResult<()>> {
        self.fs.delete_file(bare_file_name(filepath), Directory::Data)
    }

    fn to_record(&self, file_name: &str, _saved: &SavedFile, captured: &CameraPhoto) -> Photo {
        Photo::new(file_name, captured.web_path.clone())
    }

    fn hydrate<'a>(&'a self, photo: Photo) -> CapabilityFuture<'a, GalleryResult<Photo>> {
        Box::pin(async move {
            // Resource references from an earlier session are dead; rebuild from storage.
            match self.fs.read_file(&photo.filepath, Some(Directory::Data)).await {
                Ok(data) => Ok(Photo::new(photo.filepath, Some(jpeg_data_uri(&data)))),
                Err(e) if e.is_not_found() => {
                    log::warn!("Blob {} missing, listing without preview", photo.filepath);
                    Ok(Photo::new(photo.filepath, None))
                }
                Err(e) => Err(e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryFetcher, MemoryFilesystem};
    use crate::models::DEFAULT_DISPLAY_ORIGIN;

    #[test]
    fn test_bare_file_name() {
        assert_eq!(bare_file_name("file:///data/user/0/app/files/1.jpeg"), "1.jpeg");
        assert_eq!(bare_file_name("1.jpeg"), "1.jpeg");
        assert_eq!(bare_file_name("dir/"), "");
    }

    #[test]
    fn test_convert_file_src() {
        assert_eq!(
            convert_file_src("file:///data/1.jpeg", DEFAULT_DISPLAY_ORIGIN),
            "https://localhost/_app_file_/data/1.jpeg"
        );
        assert_eq!(
            convert_file_src("/data/1.jpeg", "https://localhost/_app_file_/"),
            "https://localhost/_app_file_/data/1.jpeg"
        );
        assert_eq!(
            convert_file_src("content://media/1", DEFAULT_DISPLAY_ORIGIN),
            "content://media/1"
        );
    }

    #[tokio::test]
    async fn test_native_reads_camera_path() {
        let fs = MemoryFilesystem::default();
        fs.insert("/cache/IMG_1.jpg", "aGVsbG8=");
        let store = NativePhotoStore::new(fs, DEFAULT_DISPLAY_ORIGIN);

        let captured = CameraPhoto {
            path: Some("file:///cache/IMG_1.jpg".to_string()),
            web_path: None,
        };
        assert_eq!(store.fetch_bytes(&captured).await.unwrap(), "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_native_requires_path() {
        let store = NativePhotoStore::new(MemoryFilesystem::default(), DEFAULT_DISPLAY_ORIGIN);
        let captured = CameraPhoto {
            path: None,
            web_path: Some("blob:x".to_string()),
        };
        assert!(matches!(
            store.fetch_bytes(&captured).await,
            Err(PhotoGalleryError::CapabilityUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_native_record_uses_uri() {
        let fs = MemoryFilesystem::default();
        let store = NativePhotoStore::new(fs.clone(), DEFAULT_DISPLAY_ORIGIN);

        let saved = store.persist("42.jpeg", "AAAA").await.unwrap();
        let record = store.to_record("42.jpeg", &saved, &CameraPhoto::default());
        assert_eq!(record.filepath, "file:///data/42.jpeg");
        assert_eq!(
            record.display_path.as_deref(),
            Some("https://localhost/_app_file_/data/42.jpeg")
        );

        store.remove(&record.filepath).await.unwrap();
        assert_eq!(fs.delete_calls(), vec!["42.jpeg".to_string()]);
        assert!(!fs.contains_data("42.jpeg"));
    }

    #[tokio::test]
    async fn test_native_hydrate_keeps_record() {
        let store = NativePhotoStore::new(MemoryFilesystem::default(), DEFAULT_DISPLAY_ORIGIN);
        let photo = Photo::new("file:///data/1.jpeg", None);
        assert_eq!(store.hydrate(photo.clone()).await.unwrap(), photo);
    }

    #[tokio::test]
    async fn test_browser_fetches_web_path() {
        let fetcher = MemoryFetcher::default();
        fetcher.insert("blob:http://localhost/abc", b"hello");
        let store = BrowserPhotoStore::new(MemoryFilesystem::default(), fetcher);

        let captured = CameraPhoto {
            path: None,
            web_path: Some("blob:http://localhost/abc".to_string()),
        };
        assert_eq!(store.fetch_bytes(&captured).await.unwrap(), "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_browser_fetch_failure_propagates() {
        let store = BrowserPhotoStore::new(MemoryFilesystem::default(), MemoryFetcher::default());
        let captured = CameraPhoto {
            path: None,
            web_path: Some("blob:http://localhost/revoked".to_string()),
        };
        assert!(matches!(
            store.fetch_bytes(&captured).await,
            Err(PhotoGalleryError::Fetch(_))
        ));
    }

    #[tokio::test]
    async fn test_browser_record_reuses_web_path() {
        let store = BrowserPhotoStore::new(MemoryFilesystem::default(), MemoryFetcher::default());
        let captured = CameraPhoto {
            path: None,
            web_path: Some("blob:http://localhost/abc".to_string()),
        };
        let saved = store.persist("7.jpeg", "AAAA").await.unwrap();
        let record = store.to_record("7.jpeg", &saved, &captured);
        assert_eq!(record, Photo::new("7.jpeg", captured.web_path.clone()));
    }

    #[tokio::test]
    async fn test_browser_hydrate_builds_data_uri() {
        let fs = MemoryFilesystem::default();
        fs.insert_data("123.jpeg", "AAAA");
        let store = BrowserPhotoStore::new(fs, MemoryFetcher::default());

        let photo = store
            .hydrate(Photo::new("123.jpeg", Some("blob:stale".to_string())))
            .await
            .unwrap();
        assert_eq!(photo.filepath, "123.jpeg");
        assert_eq!(photo.display_path.as_deref(), Some("data:image/jpeg;base64,AAAA"));
    }

    #[tokio::test]
    async fn test_browser_hydrate_keeps_record_without_blob() {
        let store = BrowserPhotoStore::new(MemoryFilesystem::default(), MemoryFetcher::default());

        let photo = store
            .hydrate(Photo::new("404.jpeg", Some("blob:stale".to_string())))
            .await
            .unwrap();
        assert_eq!(photo, Photo::new("404.jpeg", None));
    }
}
