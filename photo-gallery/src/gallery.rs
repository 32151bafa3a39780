//! Gallery state: the ordered photo list and the operations that mutate it.
//!
//! Mutations run one at a time behind a writer lock. Each successful mutation
//! commits the new list, writes it through to the metadata cache and publishes
//! it to subscribers.

use crate::cache::MetadataCache;
use crate::capabilities::Camera;
use crate::error::GalleryResult;
use crate::models::{CameraOptions, Photo, PHOTO_FILE_EXTENSION};
use crate::store::{bare_file_name, PhotoStore};
use std::cell::Cell;
use tokio::sync::{watch, Mutex, MutexGuard};

/// Owns the photo collection for one application session
pub struct PhotoGallery {
    camera: Box<dyn Camera>,
    store: Box<dyn PhotoStore>,
    cache: MetadataCache,
    photos: Mutex<Vec<Photo>>,
    published: watch::Sender<Vec<Photo>>,
    last_timestamp_ms: Cell<i64>,
}

impl PhotoGallery {
    pub fn new(camera: Box<dyn Camera>, store: Box<dyn PhotoStore>, cache: MetadataCache) -> Self {
        let (published, _) = watch::channel(Vec::new());
        Self {
            camera,
            store,
            cache,
            photos: Mutex::new(Vec::new()),
            published,
            last_timestamp_ms: Cell::new(0),
        }
    }

    /// Snapshot of the last committed collection, newest first
    pub fn photos(&self) -> Vec<Photo> {
        self.published.borrow().clone()
    }

    /// Receiver notified after every committed change
    pub fn subscribe(&self) -> watch::Receiver<Vec<Photo>> {
        self.published.subscribe()
    }

    /// Loads the cached collection. Call once before capture or delete.
    ///
    /// Returns the number of photos loaded. On error the collection stays empty.
    pub async fn initialize(&self) -> GalleryResult<usize> {
        let mut photos = self.photos.lock().await;
        let loaded = self.cache.load(self.store.as_ref()).await.map_err(|e| {
            log::error!("Loading cached photos failed: {}", e);
            e
        })?;

        log::info!(
            "Loaded {} photos ({:?})",
            loaded.len(),
            self.store.platform()
        );
        let count = loaded.len();
        *photos = loaded;
        self.published.send_replace(photos.clone());
        Ok(count)
    }

    /// Takes a picture, stores it and prepends the new record
    ///
    /// Nothing changes when the camera, byte resolution or write fails.
    pub async fn capture(&self) -> GalleryResult<Photo> {
        let mut photos = self.photos.lock().await;

        let options = CameraOptions::capture();
        let captured = self.camera.get_photo(&options).await.map_err(|e| {
            log::error!("Camera failed: {}", e);
            e
        })?;

        let file_name = self.next_file_name(&photos);
        log::debug!("=== capture: saving {} ===", file_name);

        let data = self.store.fetch_bytes(&captured).await?;
        let saved = self.store.persist(&file_name, &data).await.map_err(|e| {
            log::error!("Writing {} failed: {}", file_name, e);
            e
        })?;
        let record = self.store.to_record(&file_name, &saved, &captured);

        let mut next = Vec::with_capacity(photos.len() + 1);
        next.push(record.clone());
        next.extend(photos.iter().cloned());
        self.commit(&mut photos, next).await;

        Ok(record)
    }

    /// Deletes the stored blob, then every record with the same `filepath`
    ///
    /// Returns how many records were removed. If storage refuses the delete the
    /// collection is left as it was; a blob that is already gone counts as
    /// deleted.
    pub async fn delete(&self, photo: &Photo) -> GalleryResult<usize> {
        let mut photos = self.photos.lock().await;

        match self.store.remove(&photo.filepath).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                log::warn!(
                    "Blob {} already missing, removing record",
                    bare_file_name(&photo.filepath)
                );
            }
            Err(e) => {
                log::error!("Deleting {} failed: {}", photo.filepath, e);
                return Err(e);
            }
        }

        let next: Vec<Photo> = photos
            .iter()
            .filter(|p| p.filepath != photo.filepath)
            .cloned()
            .collect();
        let removed = photos.len() - next.len();
        if removed == 0 {
            log::debug!("{} not in gallery", photo.filepath);
            return Ok(0);
        }

        self.commit(&mut photos, next).await;
        Ok(removed)
    }

    /// Installs `next`, writes it through to the cache and publishes it
    ///
    /// Cache failures are logged only; the in-memory change stands.
    async fn commit(&self, photos: &mut MutexGuard<'_, Vec<Photo>>, next: Vec<Photo>) {
        **photos = next;
        if let Err(e) = self.cache.save(photos.as_slice()).await {
            log::warn!("Caching {} photos failed: {}", photos.len(), e);
        }
        self.published.send_replace(photos.to_vec());
    }

    /// `<epoch-millis>.jpeg`, strictly increasing within the session and never
    /// matching a name already in the collection
    fn next_file_name(&self, photos: &[Photo]) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let mut stamp = now.max(self.last_timestamp_ms.get().saturating_add(1));
        loop {
            let name = format!("{}.{}", stamp, PHOTO_FILE_EXTENSION);
            if !photos.iter().any(|p| bare_file_name(&p.filepath) == name) {
                self.last_timestamp_ms.set(stamp);
                return name;
            }
            stamp += 1;
        }
    }
}
