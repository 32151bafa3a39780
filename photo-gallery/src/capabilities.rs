//! Contracts for the platform capabilities the gallery orchestrates.
//!
//! Futures are boxed so the traits stay object-safe, and are not required to be
//! `Send`: the gallery runs on a single-threaded cooperative runtime.

use crate::error::GalleryResult;
use crate::models::{CameraOptions, CameraPhoto, Directory, SavedFile};
use std::future::Future;
use std::pin::Pin;

/// Object-safe boxed future returned by capability methods
pub type CapabilityFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Device camera
pub trait Camera {
    fn get_photo<'a>(
        &'a self,
        options: &'a CameraOptions,
    ) -> CapabilityFuture<'a, GalleryResult<CameraPhoto>>;
}

/// File storage exchanging contents as base64 text
pub trait Filesystem {
    /// Reads `path`, relative to `directory` when one is given, otherwise as an
    /// absolute path or `file://` URI.
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: Option<Directory>,
    ) -> CapabilityFuture<'a, GalleryResult<String>>;

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: Directory,
    ) -> CapabilityFuture<'a, GalleryResult<SavedFile>>;

    fn delete_file<'a>(
        &'a self,
        path: &'a str,
        directory: Directory,
    ) -> CapabilityFuture<'a, GalleryResult<()>>;
}

/// String key-value storage
pub trait KeyValueStore {
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> CapabilityFuture<'a, GalleryResult<()>>;

    fn get<'a>(&'a self, key: &'a str) -> CapabilityFuture<'a, GalleryResult<Option<String>>>;
}

/// Loads the bytes behind a resource reference (blob or http URL)
pub trait ResourceFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> CapabilityFuture<'a, GalleryResult<Vec<u8>>>;
}
