//! Disk-backed store for proxied image bytes.
//!
//! One file per source URL, named `{key}.{ext}`. Entries are never evicted;
//! only [`DiskImageCache::clear`] removes them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

use super::content_type::{KNOWN_EXTENSIONS, content_type_for_extension, extension_for};
use crate::domain::entities::CacheKey;
use crate::domain::errors::FetchError;

/// An image read back from disk.
#[derive(Debug, Clone)]
pub struct CachedImage {
    /// Stored bytes.
    pub bytes: Bytes,
    /// Content type derived from the file extension.
    pub content_type: &'static str,
}

/// Metadata for one stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFileInfo {
    /// File name inside the cache directory.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, or modification time where the filesystem lacks it.
    pub created: Option<DateTime<Utc>>,
}

/// Snapshot of the cache directory.
#[derive(Debug, Clone, Default)]
pub struct DiskCacheStats {
    /// Number of files.
    pub total_files: usize,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
    /// Per-file metadata, sorted by name.
    pub files: Vec<CachedFileInfo>,
}

impl DiskCacheStats {
    /// Total size in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_size_mb(&self) -> f64 {
        self.total_size as f64 / (1024.0 * 1024.0)
    }
}

/// Disk-based image cache keyed by URL hash.
#[derive(Debug, Clone)]
pub struct DiskImageCache {
    cache_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl DiskImageCache {
    /// Creates a cache rooted at `cache_dir`. The directory is created on
    /// first store.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Creates the cache directory and any missing parents.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), FetchError> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| FetchError::storage(format!("Failed to create cache dir: {e}")))
    }

    /// Finds the stored file for `key`, whatever its extension.
    ///
    /// Known extensions are checked by path first; the directory is only
    /// scanned when none of them exists.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be read.
    pub async fn find(&self, key: &CacheKey) -> Result<Option<PathBuf>, FetchError> {
        if let Some(path) = self.find_known(key).await? {
            trace!(key = %key, path = %path.display(), "Disk cache hit");
            return Ok(Some(path));
        }
        let found = self.scan(key).await?;
        match &found {
            Some(path) => trace!(key = %key, path = %path.display(), "Disk cache hit after scan"),
            None => trace!(key = %key, "Disk cache miss"),
        }
        Ok(found)
    }

    /// Reads the stored image for `key`.
    ///
    /// # Errors
    /// Returns error if the directory or file cannot be read.
    pub async fn lookup(&self, key: &CacheKey) -> Result<Option<CachedImage>, FetchError> {
        match self.find(key).await? {
            Some(path) => self.read_at(&path).await,
            None => Ok(None),
        }
    }

    /// Reads a file previously returned by [`DiskImageCache::find`].
    /// Returns `None` if it was removed in the meantime.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read.
    #[allow(clippy::unused_self)]
    pub async fn read_at(&self, path: &Path) -> Result<Option<CachedImage>, FetchError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(CachedImage {
                content_type: content_type_of(path),
                bytes: Bytes::from(bytes),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FetchError::storage(format!(
                "Failed to read cache file: {e}"
            ))),
        }
    }

    /// Checks if an image is cached.
    pub async fn contains(&self, key: &CacheKey) -> bool {
        matches!(self.find(key).await, Ok(Some(_)))
    }

    /// Stores bytes for `key`, naming the file after the extension inferred
    /// from `url` or `content_type`.
    ///
    /// The bytes land in a temporary dot-file first and are renamed into
    /// place, so readers never see a partial file. Files stored earlier for
    /// the same key under another extension are removed.
    ///
    /// # Errors
    /// Returns error if the file cannot be created or written.
    pub async fn store(
        &self,
        key: &CacheKey,
        url: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<PathBuf, FetchError> {
        self.ensure_dir().await?;

        let ext = extension_for(url, content_type);
        let path = self.cache_dir.join(format!("{key}.{ext}"));
        let temp_path = self
            .cache_dir
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

        if let Err(e) = write_file(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.remove_siblings(key, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(FetchError::storage(format!(
                "Failed to move cache file into place: {e}"
            )));
        }

        debug!(key = %key, path = %path.display(), size = bytes.len(), "Stored image in disk cache");
        Ok(path)
    }

    async fn find_known(&self, key: &CacheKey) -> Result<Option<PathBuf>, FetchError> {
        for ext in KNOWN_EXTENSIONS {
            let path = self.cache_dir.join(format!("{key}.{ext}"));
            match fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => return Ok(Some(path)),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(FetchError::storage(format!(
                        "Failed to read cache file metadata: {e}"
                    )));
                }
            }
        }
        Ok(None)
    }

    async fn scan(&self, key: &CacheKey) -> Result<Option<PathBuf>, FetchError> {
        Ok(self.entries_for(key).await?.into_iter().next())
    }

    /// Every non-temporary file named `{key}.*`.
    async fn entries_for(&self, key: &CacheKey) -> Result<Vec<PathBuf>, FetchError> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(FetchError::storage(format!(
                    "Failed to read cache dir: {e}"
                )));
            }
        };

        let mut found = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FetchError::storage(format!("Failed to read entry: {e}")))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let stem = name.split_once('.').map_or(name, |(stem, _)| stem);
            if stem == key.as_str() {
                found.push(entry.path());
            }
        }
        Ok(found)
    }

    async fn remove_siblings(&self, key: &CacheKey, keep: &Path) -> Result<(), FetchError> {
        for path in self.entries_for(key).await? {
            if path == keep {
                continue;
            }
            match fs::remove_file(&path).await {
                Ok(()) => debug!(key = %key, path = %path.display(), "Removed stale cache file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(FetchError::storage(format!(
                        "Failed to remove stale cache file: {e}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Enumerates the cache directory.
    ///
    /// # Errors
    /// Returns error if the directory or an entry's metadata cannot be read.
    pub async fn stats(&self) -> Result<DiskCacheStats, FetchError> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DiskCacheStats::default()),
            Err(e) => {
                return Err(FetchError::storage(format!(
                    "Failed to read cache dir: {e}"
                )));
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FetchError::storage(format!("Failed to read entry: {e}")))?
        {
            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(FetchError::storage(format!(
                        "Failed to read file metadata: {e}"
                    )));
                }
            };
            if !meta.is_file() {
                continue;
            }
            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            files.push(CachedFileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: meta.len(),
                created,
            });
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(DiskCacheStats {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            files,
        })
    }

    /// Deletes every file in the cache directory and returns how many were
    /// removed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be read or a file cannot be
    /// removed.
    pub async fn clear(&self) -> Result<usize, FetchError> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(FetchError::storage(format!(
                    "Failed to read cache dir: {e}"
                )));
            }
        };

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FetchError::storage(format!("Failed to read entry: {e}")))?
        {
            let path = entry.path();
            if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
                continue;
            }
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove cache file");
                    return Err(FetchError::storage(format!(
                        "Failed to remove cache file: {e}"
                    )));
                }
            }
        }

        info!(count = removed, "Cleared disk cache");
        Ok(removed)
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), FetchError> {
    let mut file = fs::File::create(path)
        .await
        .map_err(|e| FetchError::storage(format!("Failed to create cache file: {e}")))?;
    file.write_all(bytes)
        .await
        .map_err(|e| FetchError::storage(format!("Failed to write cache file: {e}")))?;
    file.flush()
        .await
        .map_err(|e| FetchError::storage(format!("Failed to flush cache file: {e}")))
}

fn content_type_of(path: &Path) -> &'static str {
    content_type_for_extension(
        path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default(),
    )
}
