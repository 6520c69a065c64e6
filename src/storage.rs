// SPDX-License-Identifier: MPL-2.0

//! Storage for captured and imported images
//!
//! Everything the roll shows lives in one cache directory. The roll is not
//! persisted, so [`FileManager::prepare`] clears whatever a previous run left.

use crate::backends::camera::types::ImageFormat;
use crate::constants::{app_info, file_formats, storage};
use crate::errors::StorageError;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Decoded, downscaled image for a roll tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Reads and writes image files in the capture cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileManager {
    cache_dir: PathBuf,
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new(Self::default_cache_dir())
    }
}

impl FileManager {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// `$XDG_CACHE_HOME/<app>/captures`
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(app_info::DIR_NAME)
            .join(storage::CAPTURES_DIR)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Create the cache directory and remove leftovers from a previous run
    ///
    /// Returns how many files were swept.
    pub async fn prepare(&self) -> Result<usize, StorageError> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| StorageError::CacheUnavailable(format!("{}: {}", self.cache_dir.display(), e)))?;

        let mut entries = tokio::fs::read_dir(&self.cache_dir)
            .await
            .map_err(|e| StorageError::CacheUnavailable(e.to_string()))?;

        let mut swept = 0;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %self.cache_dir.display(), error = %e, "Stopped sweeping capture cache");
                    break;
                }
            };
            let path = entry.path();
            if !is_image_path(&path) {
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => swept += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to sweep stale capture"),
            }
        }

        info!(dir = %self.cache_dir.display(), swept, "Capture cache ready");
        Ok(swept)
    }

    /// `IMG_<timestamp>`, the stem of a captured photo's file name
    fn timestamped_stem() -> String {
        let timestamp = chrono::Local::now().format(storage::TIMESTAMP_FORMAT);
        format!("{}{}", storage::IMAGE_PREFIX, timestamp)
    }

    /// Random `<uuid>.<ext>` path for an imported file
    pub fn temp_image_path(&self, extension: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", uuid::Uuid::new_v4(), extension))
    }

    /// Write encoded image bytes to a new timestamped file
    ///
    /// `IMG_<timestamp>.<ext>`, with `_N` appended if the name is taken.
    pub async fn create_image_file(
        &self,
        bytes: &[u8],
        format: ImageFormat,
    ) -> Result<PathBuf, StorageError> {
        self.create_unique_file(&Self::timestamped_stem(), format.extension(), bytes)
            .await
    }

    /// Create `<stem>.<ext>` (or the first free `<stem>_N.<ext>`) and fill it
    ///
    /// The name is claimed with `create_new`, so two writers never share a file.
    async fn create_unique_file(
        &self,
        stem: &str,
        ext: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let mut suffix = 0u32;
        let (path, mut file) = loop {
            let path = self.cache_dir.join(image_file_name(stem, suffix, ext));
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Name taken, trying next suffix");
                    suffix += 1;
                }
                Err(e) => return Err(StorageError::write(&path, e)),
            }
        };

        file.write_all(bytes)
            .await
            .map_err(|e| StorageError::write(&path, e))?;
        file.flush()
            .await
            .map_err(|e| StorageError::write(&path, e))?;

        info!(path = %path.display(), size = bytes.len(), "Image saved");
        Ok(path)
    }

    /// Copy a picked file into the cache under a random name
    pub async fn import(&self, source: &Path) -> Result<PathBuf, StorageError> {
        let extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| file_formats::is_image_extension(ext))
            .ok_or_else(|| StorageError::copy(source, "not a supported image file"))?;

        let target = self.temp_image_path(&extension);
        tokio::fs::copy(source, &target)
            .await
            .map_err(|e| StorageError::copy(source, e))?;

        info!(source = %source.display(), target = %target.display(), "Image imported");
        Ok(target)
    }

    /// Delete a roll entry
    ///
    /// Only files inside the cache are touched. A file that is already gone
    /// counts as deleted.
    pub async fn delete(&self, path: &Path) -> Result<(), StorageError> {
        if !path.starts_with(&self.cache_dir) {
            return Err(StorageError::delete(path, "outside the capture cache"));
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Image already removed");
                Ok(())
            }
            Err(e) => Err(StorageError::delete(path, e)),
        }
    }

    /// Copy an image into a user folder, keeping its file name
    pub async fn export(&self, path: &Path, target_dir: &Path) -> Result<PathBuf, StorageError> {
        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|e| StorageError::write(target_dir, e))?;

        let file_name = path
            .file_name()
            .ok_or_else(|| StorageError::copy(path, "no file name"))?;
        let target = target_dir.join(file_name);
        tokio::fs::copy(path, &target)
            .await
            .map_err(|e| StorageError::copy(path, e))?;

        info!(source = %path.display(), target = %target.display(), "Image exported");
        Ok(target)
    }

    /// Whether the cache directory can be created and written
    pub async fn is_writable(&self) -> bool {
        if let Err(e) = tokio::fs::create_dir_all(&self.cache_dir).await {
            warn!(dir = %self.cache_dir.display(), error = %e, "Cache directory unavailable");
            return false;
        }

        let marker = self.cache_dir.join(storage::WRITE_MARKER);
        let writable = tokio::fs::write(&marker, b"").await.is_ok();
        let _ = tokio::fs::remove_file(&marker).await;
        writable
    }
}

/// Decode an image and shrink it for a roll tile
pub async fn load_thumbnail(path: PathBuf) -> Result<Thumbnail, StorageError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| StorageError::decode(&path, e))?;

    tokio::task::spawn_blocking(move || {
        let img = image::load_from_memory(&bytes).map_err(|e| StorageError::decode(&path, e))?;
        let thumb = img
            .thumbnail(storage::THUMBNAIL_SIZE, storage::THUMBNAIL_SIZE)
            .to_rgba8();
        let (width, height) = thumb.dimensions();
        debug!(path = %path.display(), width, height, "Thumbnail decoded");

        Ok(Thumbnail {
            rgba: thumb.into_raw(),
            width,
            height,
        })
    })
    .await
    .map_err(|e| StorageError::CacheUnavailable(format!("Thumbnail task error: {}", e)))?
}

/// `<stem>.<ext>` for suffix 0, `<stem>_<suffix>.<ext>` after that
fn image_file_name(stem: &str, suffix: u32, ext: &str) -> String {
    if suffix == 0 {
        format!("{}.{}", stem, ext)
    } else {
        format!("{}_{}.{}", stem, suffix, ext)
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| file_formats::is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timestamped_name_layout() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileManager::new(dir.path());

        let path = files.create_image_file(b"png", ImageFormat::Png).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("IMG_"));
        assert!(name.ends_with(".png"));
        assert_eq!(path.parent(), Some(dir.path()));
    }

    #[test]
    fn test_suffix_only_after_first_name() {
        assert_eq!(image_file_name("IMG_1", 0, "jpg"), "IMG_1.jpg");
        assert_eq!(image_file_name("IMG_1", 2, "jpg"), "IMG_1_2.jpg");
    }

    #[tokio::test]
    async fn test_existing_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileManager::new(dir.path());
        let taken = dir.path().join("IMG_same.jpg");
        std::fs::write(&taken, b"first").unwrap();

        let path = files.create_unique_file("IMG_same", "jpg", b"second").await.unwrap();
        assert_eq!(path, dir.path().join("IMG_same_1.jpg"));
        assert_eq!(std::fs::read(&taken).unwrap(), b"first");
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        let third = files.create_unique_file("IMG_same", "jpg", b"third").await.unwrap();
        assert_eq!(third, dir.path().join("IMG_same_2.jpg"));
    }

    #[test]
    fn test_temp_names_are_random() {
        let files = FileManager::new("/tmp/cache");
        let a = files.temp_image_path("jpg");
        let b = files.temp_image_path("jpg");
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "jpg");
    }

    #[tokio::test]
    async fn test_delete_refuses_outside_cache() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::NamedTempFile::new().unwrap();
        let files = FileManager::new(dir.path().join("captures"));

        let result = files.delete(outside.path()).await;
        assert!(matches!(result, Err(StorageError::DeleteFailed { .. })));
        assert!(outside.path().exists());
    }
}
