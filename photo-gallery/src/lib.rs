//! # Photo Gallery
//!
//! Capture, store, list and delete photos in a small client-side gallery.
//!
//! This crate provides:
//! - An ordered, newest-first photo collection ([`PhotoGallery`])
//! - Write-through caching of the collection in a key-value store
//! - Photo byte storage for native-bridge and browser runtimes ([`PhotoStore`])
//! - Capability contracts for camera, filesystem, key-value storage and
//!   resource fetching, with local, SQLite, HTTP and in-memory adapters
//!
//! ## Platform Separation
//!
//! The gallery is written against [`PhotoStore`]; the runtime difference
//! (direct file paths vs. ephemeral resource references) lives entirely in
//! [`NativePhotoStore`] and [`BrowserPhotoStore`].
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_gallery::*;
//!
//! let config = PhotoGalleryConfig {
//!     storage_path: "/path/to/photos".to_string(),
//!     ..PhotoGalleryConfig::default()
//! };
//! let store = NativePhotoStore::new(
//!     LocalFilesystem::new(&config.storage_path),
//!     config.display_origin.clone(),
//! );
//! let cache = MetadataCache::new(
//!     Box::new(SqliteKeyValueStore::open("gallery.db")?),
//!     config.cache_key.clone(),
//! );
//! let gallery = PhotoGallery::new(Box::new(DeviceCamera::default()), Box::new(store), cache);
//!
//! gallery.initialize().await?;
//! let photo = gallery.capture().await?;
//! gallery.delete(&photo).await?;
//! ```

pub mod cache;
pub mod capabilities;
pub mod codec;
pub mod error;
pub mod filesystem;
pub mod gallery;
pub mod kv_store;
pub mod memory;
pub mod models;
pub mod picker;
pub mod schema;
pub mod store;

#[cfg(feature = "http")]
pub mod fetch;

pub use cache::MetadataCache;
pub use capabilities::{Camera, CapabilityFuture, Filesystem, KeyValueStore, ResourceFetcher};
pub use codec::{encode_to_base64, jpeg_data_uri};
pub use error::{GalleryResult, PhotoGalleryError};
pub use filesystem::LocalFilesystem;
pub use gallery::PhotoGallery;
pub use kv_store::SqliteKeyValueStore;
pub use memory::{MemoryCamera, MemoryFetcher, MemoryFilesystem, MemoryKeyValueStore};
pub use models::{
    CameraOptions, CameraPhoto, CameraSource, Directory, Photo, PhotoGalleryConfig, Platform,
    SavedFile,
};
pub use picker::{AndroidPickerConfig, DeviceCamera};
pub use schema::init_kv_schema;
pub use store::{bare_file_name, convert_file_src, BrowserPhotoStore, NativePhotoStore, PhotoStore};

#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
