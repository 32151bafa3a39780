use crate::capabilities::KeyValueStore;
use crate::error::GalleryResult;
use crate::models::Photo;
use crate::store::PhotoStore;

/// Ordered photo list persisted as one JSON array under a single key
pub struct MetadataCache {
    kv: Box<dyn KeyValueStore>,
    key: String,
}

impl MetadataCache {
    pub fn new(kv: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub async fn save(&self, photos: &[Photo]) -> GalleryResult<()> {
        let raw = serde_json::to_string(photos)?;
        self.kv.set(&self.key, &raw).await?;
        log::debug!("Cached {} photos under '{}'", photos.len(), self.key);
        Ok(())
    }

    /// Loads the cached list and prepares each record for display
    ///
    /// A missing key yields an empty list; unparsable JSON is an error.
    pub async fn load(&self, store: &dyn PhotoStore) -> GalleryResult<Vec<Photo>> {
        let Some(raw) = self.kv.get(&self.key).await? else {
            log::debug!("No cached photos under '{}'", self.key);
            return Ok(Vec::new());
        };

        let cached: Vec<Photo> = serde_json::from_str(&raw)?;
        let mut photos = Vec::with_capacity(cached.len());
        for photo in cached {
            photos.push(store.hydrate(photo).await?);
        }
        Ok(photos)
    }
}
