//! Album source backed by local JSON files
//!
//! An album file holds a JSON array of images in the Imgur shape
//! (`id`, `title`, `description`, `link`, `datetime`). Album hashes and
//! gallery ids are resolved to `<dir>/<id>.json`; a source opened on a single
//! file serves that file for every album hash.

use super::{AlbumSource, SourceError};
use crate::types::TaggedImage;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Directory(PathBuf),
}

/// Offline album source
#[derive(Debug, Clone)]
pub struct FileAlbumSource {
    location: Location,
    key: String,
}

impl FileAlbumSource {
    /// Serve one album file regardless of the requested hash
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = format!("file:{}", path.display());
        Self {
            location: Location::File(path),
            key,
        }
    }

    /// Serve `<dir>/<hash>.json` for each album hash or gallery id
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let key = format!("dir:{}", dir.display());
        Self {
            location: Location::Directory(dir),
            key,
        }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        match &self.location {
            Location::File(path) => path.clone(),
            Location::Directory(dir) => dir.join(format!("{}.json", id)),
        }
    }

    async fn read_images(path: &Path) -> Result<Vec<TaggedImage>, SourceError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotAvailable(format!("Album file not found: {}", path.display()))
            } else {
                SourceError::Network(format!("Failed to read {}: {}", path.display(), e))
            }
        })?;

        let images: Vec<TaggedImage> = serde_json::from_str(&content).map_err(|e| {
            SourceError::Parse(format!("Invalid album file {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), count = images.len(), "Album file loaded");
        Ok(images)
    }
}

#[async_trait]
impl AlbumSource for FileAlbumSource {
    fn source_key(&self) -> &str {
        &self.key
    }

    async fn album_images(&self, album_hash: &str) -> Result<Vec<TaggedImage>, SourceError> {
        Self::read_images(&self.path_for(album_hash)).await
    }

    async fn gallery_images(&self, gallery_id: &str) -> Result<Vec<TaggedImage>, SourceError> {
        match &self.location {
            Location::Directory(_) => Self::read_images(&self.path_for(gallery_id)).await,
            Location::File(_) => Err(SourceError::NotAvailable(format!(
                "Gallery {} not available from a single album file",
                gallery_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ALBUM: &str = r##"[
        {"id": "t2", "description": "#2 tag by u/bob", "link": "https://i.imgur.com/t2.jpg", "datetime": 200},
        {"id": "p1", "description": "#1 proof by u/bob", "link": "https://i.imgur.com/p1.jpg", "datetime": 150}
    ]"##;

    #[tokio::test]
    async fn test_single_file_serves_any_hash() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("album.json");
        std::fs::write(&path, ALBUM).unwrap();

        let source = FileAlbumSource::from_file(&path);
        let images = source.album_images("whatever").await.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, "t2");
        assert!(matches!(
            source.gallery_images("g").await,
            Err(SourceError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_directory_resolves_by_id() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("abc.json"), ALBUM).unwrap();

        let source = FileAlbumSource::from_dir(dir.path());
        assert_eq!(source.album_images("abc").await.unwrap().len(), 2);
        assert_eq!(source.gallery_images("abc").await.unwrap().len(), 2);
        assert!(matches!(
            source.album_images("missing").await,
            Err(SourceError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let source = FileAlbumSource::from_file(&path);
        assert!(matches!(
            source.album_images("x").await,
            Err(SourceError::Parse(_))
        ));
    }
}
