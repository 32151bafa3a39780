//! In-memory capability adapters for tests and headless runs.
//!
//! Every adapter is a cheap handle over shared state: clones observe and
//! mutate the same data.

use crate::capabilities::{Camera, CapabilityFuture, Filesystem, KeyValueStore, ResourceFetcher};
use crate::error::{GalleryResult, PhotoGalleryError};
use crate::models::{CameraOptions, CameraPhoto, Directory, SavedFile};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Root that [`Directory::Data`] maps to
pub const MEMORY_DATA_ROOT: &str = "/data";

fn not_found(what: &str) -> PhotoGalleryError {
    PhotoGalleryError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} not found", what),
    ))
}

#[derive(Debug, Default)]
struct FilesystemState {
    files: HashMap<String, String>,
    deletes: Vec<String>,
    fail_writes: bool,
    fail_deletes: bool,
}

/// Filesystem holding base64 contents keyed by absolute path
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Rc<RefCell<FilesystemState>>,
}

impl MemoryFilesystem {
    fn key(path: &str, directory: Option<Directory>) -> String {
        match directory {
            Some(Directory::Data) => format!("{}/{}", MEMORY_DATA_ROOT, path),
            None => path.strip_prefix("file://").unwrap_or(path).to_string(),
        }
    }

    /// Places a file at an absolute path, e.g. a camera's temporary output
    pub fn insert(&self, path: &str, base64_data: &str) {
        self.inner
            .borrow_mut()
            .files
            .insert(Self::key(path, None), base64_data.to_string());
    }

    pub fn insert_data(&self, name: &str, base64_data: &str) {
        self.inner
            .borrow_mut()
            .files
            .insert(Self::key(name, Some(Directory::Data)), base64_data.to_string());
    }

    pub fn contains_data(&self, name: &str) -> bool {
        self.inner
            .borrow()
            .files
            .contains_key(&Self::key(name, Some(Directory::Data)))
    }

    /// Names passed to every `delete_file` call, in order
    pub fn delete_calls(&self) -> Vec<String> {
        self.inner.borrow().deletes.clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.inner.borrow_mut().fail_deletes = fail;
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: Option<Directory>,
    ) -> CapabilityFuture<'a, GalleryResult<String>> {
        Box::pin(async move {
            let key = Self::key(path, directory);
            self.inner
                .borrow()
                .files
                .get(&key)
                .cloned()
                .ok_or_else(|| not_found(&key))
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: Directory,
    ) -> CapabilityFuture<'a, GalleryResult<SavedFile>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if state.fail_writes {
                return Err(PhotoGalleryError::Io(std::io::Error::new(
                    std::io::ErrorKind::StorageFull,
                    "quota exceeded",
                )));
            }
            let key = Self::key(path, Some(directory));
            state.files.insert(key.clone(), data.to_string());
            Ok(SavedFile {
                uri: format!("file://{}", key),
            })
        })
    }

    fn delete_file<'a>(
        &'a self,
        path: &'a str,
        directory: Directory,
    ) -> CapabilityFuture<'a, GalleryResult<()>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.deletes.push(path.to_string());
            if state.fail_deletes {
                return Err(PhotoGalleryError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "delete rejected",
                )));
            }
            let key = Self::key(path, Some(directory));
            state.files.remove(&key).map(|_| ()).ok_or_else(|| not_found(&key))
        })
    }
}

/// Key-value store that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryKeyValueStore {
    /// Store pre-populated with one value (not counted as a write)
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> CapabilityFuture<'a, GalleryResult<()>> {
        Box::pin(async move {
            if self.fail_writes.get() {
                return Err(PhotoGalleryError::Storage("storage unavailable".to_string()));
            }
            self.writes.set(self.writes.get() + 1);
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> CapabilityFuture<'a, GalleryResult<Option<String>>> {
        Box::pin(async move { Ok(self.value(key)) })
    }
}

/// Camera that replays queued results
///
/// An empty queue behaves like a user cancelling the capture.
#[derive(Debug, Clone, Default)]
pub struct MemoryCamera {
    results: Rc<RefCell<VecDeque<GalleryResult<CameraPhoto>>>>,
    requests: Rc<RefCell<Vec<CameraOptions>>>,
}

impl MemoryCamera {
    pub fn push_photo(&self, photo: CameraPhoto) {
        self.results.borrow_mut().push_back(Ok(photo));
    }

    pub fn push_error(&self, error: PhotoGalleryError) {
        self.results.borrow_mut().push_back(Err(error));
    }

    /// Options of every `get_photo` call, in order
    pub fn requests(&self) -> Vec<CameraOptions> {
        self.requests.borrow().clone()
    }
}

impl Camera for MemoryCamera {
    fn get_photo<'a>(
        &'a self,
        options: &'a CameraOptions,
    ) -> CapabilityFuture<'a, GalleryResult<CameraPhoto>> {
        Box::pin(async move {
            self.requests.borrow_mut().push(options.clone());
            self.results.borrow_mut().pop_front().unwrap_or_else(|| {
                Err(PhotoGalleryError::CapabilityUnavailable(
                    "User cancelled photos app".to_string(),
                ))
            })
        })
    }
}

/// Fetcher serving bytes registered per URL
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryFetcher {
    pub fn insert(&self, url: &str, bytes: &[u8]) {
        self.resources
            .borrow_mut()
            .insert(url.to_string(), bytes.to_vec());
    }

    /// Drops a resource, like a blob URL revoked at the end of a session
    pub fn revoke(&self, url: &str) {
        self.resources.borrow_mut().remove(url);
    }
}

impl ResourceFetcher for MemoryFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> CapabilityFuture<'a, GalleryResult<Vec<u8>>> {
        Box::pin(async move {
            self.resources
                .borrow()
                .get(url)
                .cloned()
                .ok_or_else(|| PhotoGalleryError::Fetch(format!("{} is not reachable", url)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_filesystem_clones_share_state() {
        let fs = MemoryFilesystem::default();
        let other = fs.clone();

        let saved = fs
            .write_file("1.jpeg", "AAAA", Directory::Data)
            .await
            .unwrap();
        assert_eq!(saved.uri, "file:///data/1.jpeg");
        assert!(other.contains_data("1.jpeg"));
        assert_eq!(other.read_file(&saved.uri, None).await.unwrap(), "AAAA");
    }

    #[tokio::test]
    async fn test_filesystem_records_deletes_even_when_missing() {
        let fs = MemoryFilesystem::default();
        let err = fs.delete_file("gone.jpeg", Directory::Data).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fs.delete_calls(), vec!["gone.jpeg".to_string()]);
    }

    #[tokio::test]
    async fn test_camera_without_results_is_cancelled() {
        let camera = MemoryCamera::default();
        let options = CameraOptions::capture();
        assert!(camera.get_photo(&options).await.is_err());
        assert_eq!(camera.requests(), vec![options]);
    }
}
