//! Filesystem capability backed by a local directory.

use crate::capabilities::{CapabilityFuture, Filesystem};
use crate::codec::{decode_base64, encode_to_base64};
use crate::error::GalleryResult;
use crate::models::{Directory, SavedFile};
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Stores [`Directory::Data`] files under `data_dir`
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    data_dir: PathBuf,
}

impl LocalFilesystem {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn resolve(&self, path: &str, directory: Option<Directory>) -> PathBuf {
        match directory {
            Some(Directory::Data) => self.data_dir.join(path),
            None => PathBuf::from(path.strip_prefix(FILE_SCHEME).unwrap_or(path)),
        }
    }
}

impl Filesystem for LocalFilesystem {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: Option<Directory>,
    ) -> CapabilityFuture<'a, GalleryResult<String>> {
        Box::pin(async move {
            let full_path = self.resolve(path, directory);
            log::debug!("Reading {:?}", full_path);
            let file = tokio::fs::File::open(&full_path).await?;
            Ok(encode_to_base64(file).await?)
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: Directory,
    ) -> CapabilityFuture<'a, GalleryResult<SavedFile>> {
        Box::pin(async move {
            let bytes = decode_base64(data)?;
            let full_path = self.resolve(path, Some(directory));
            if let Some(parent) = full_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&full_path, &bytes).await?;
            log::debug!("Wrote {} bytes to {:?}", bytes.len(), full_path);

            let absolute = std::path::absolute(&full_path)?;
            Ok(SavedFile {
                uri: format!("{}{}", FILE_SCHEME, absolute.display()),
            })
        })
    }

    fn delete_file<'a>(
        &'a self,
        path: &'a str,
        directory: Directory,
    ) -> CapabilityFuture<'a, GalleryResult<()>> {
        Box::pin(async move {
            let full_path = self.resolve(path, Some(directory));
            tokio::fs::remove_file(&full_path).await?;
            log::debug!("Deleted {:?}", full_path);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_delete_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path().join("photos"));

        let saved = fs
            .write_file("1700000000000.jpeg", "aGVsbG8=", Directory::Data)
            .await
            .unwrap();
        assert!(saved.uri.starts_with("file://"));
        assert!(saved.uri.ends_with("/photos/1700000000000.jpeg"));
        assert_eq!(
            std::fs::read(dir.path().join("photos/1700000000000.jpeg")).unwrap(),
            b"hello"
        );

        let data = fs
            .read_file("1700000000000.jpeg", Some(Directory::Data))
            .await
            .unwrap();
        assert_eq!(data, "aGVsbG8=");

        // The returned URI can be read back without a directory
        let by_uri = fs.read_file(&saved.uri, None).await.unwrap();
        assert_eq!(by_uri, "aGVsbG8=");

        fs.delete_file("1700000000000.jpeg", Directory::Data)
            .await
            .unwrap();
        assert!(!dir.path().join("photos/1700000000000.jpeg").exists());
    }

    #[tokio::test]
    async fn test_read_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("camera.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        let fs = LocalFilesystem::new(dir.path().join("data"));
        let data = fs.read_file(source.to_str().unwrap(), None).await.unwrap();
        assert_eq!(data, "anBlZw==");
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        let err = fs.delete_file("missing.jpeg", Directory::Data).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_write_rejects_invalid_base64() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        assert!(fs
            .write_file("x.jpeg", "%%%", Directory::Data)
            .await
            .is_err());
        assert!(!dir.path().join("x.jpeg").exists());
    }
}
