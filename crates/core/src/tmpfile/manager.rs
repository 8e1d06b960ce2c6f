//! Temp file acquisition and materialization.

use std::path::{Path, PathBuf};

use tempfile::Builder;
use thiserror::Error;
use tracing::{debug, warn};

use crate::media::{BinarySource, MediaBinary};

/// Errors raised while managing temporary files.
#[derive(Debug, Error)]
pub enum TempFileError {
    /// Unique-file allocation failed in the resolved root and in the
    /// platform default.
    #[error("temporary file cannot be created in \"{root}\"")]
    CreationFailed {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while materializing or reading back content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A uniquely named temporary file owned by a single invocation.
///
/// The file is removed when [`TempFile::release`] is called or when
/// the value is dropped, whichever comes first. Removal is idempotent:
/// a file already gone is not an error.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    released: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    /// Path of the temporary file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file.
    pub fn release(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to remove temporary file"
                );
            }
        }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Acquires and fills temporary files under a configurable root.
#[derive(Debug, Clone, Default)]
pub struct TempFileManager {
    root: Option<PathBuf>,
}

impl TempFileManager {
    /// Creates a manager with an optional configured root directory.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Creates a manager using the platform default temp directory.
    pub fn with_defaults() -> Self {
        Self::new(None)
    }

    /// Resolves the root directory for one acquisition.
    ///
    /// Order: per-call override, manager-wide configured root,
    /// platform default.
    fn resolve_root(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.root.clone())
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Acquires a uniquely named temporary file.
    ///
    /// A missing root directory is created best-effort: creation
    /// failure is only logged, since allocation falls back to the
    /// platform default as a last resort.
    pub fn acquire(
        &self,
        override_dir: Option<&Path>,
        prefix: &str,
    ) -> Result<TempFile, TempFileError> {
        let root = self.resolve_root(override_dir);

        if !root.is_dir() {
            if let Err(err) = std::fs::create_dir_all(&root) {
                warn!(
                    root = %root.display(),
                    error = %err,
                    "failed to create temporary root, allocation will fall back to the platform default"
                );
            }
        }

        let named = Builder::new()
            .prefix(prefix)
            .tempfile_in(&root)
            .or_else(|_| Builder::new().prefix(prefix).tempfile_in(std::env::temp_dir()))
            .map_err(|source| TempFileError::CreationFailed {
                root: root.clone(),
                source,
            })?;

        // Disarm tempfile's own deleter; the TempFile wrapper owns
        // removal from here on.
        let path = named
            .into_temp_path()
            .keep()
            .map_err(|err| TempFileError::Io(err.error))?;

        debug!(path = %path.display(), "acquired temporary file");
        crate::metrics::TEMP_FILES_ACQUIRED.inc();

        Ok(TempFile::new(path))
    }

    /// Materializes a payload into an acquired temporary file.
    ///
    /// File-backed payloads are copied (overwriting); buffer payloads
    /// are written out.
    pub async fn materialize(
        &self,
        binary: &MediaBinary,
        temp: &TempFile,
    ) -> Result<(), TempFileError> {
        match binary.source() {
            BinarySource::File(path) => {
                tokio::fs::copy(path, temp.path()).await?;
            }
            BinarySource::Buffer(data) => {
                tokio::fs::write(temp.path(), data).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_uses_override_over_configured_root() {
        let configured = tempfile::tempdir().unwrap();
        let overridden = tempfile::tempdir().unwrap();
        let manager = TempFileManager::new(Some(configured.path().to_path_buf()));

        let temp = manager.acquire(Some(overridden.path()), "unit").unwrap();
        assert!(temp.path().starts_with(overridden.path()));
        temp.release();
    }

    #[test]
    fn test_acquire_uses_configured_root() {
        let configured = tempfile::tempdir().unwrap();
        let manager = TempFileManager::new(Some(configured.path().to_path_buf()));

        let temp = manager.acquire(None, "unit").unwrap();
        assert!(temp.path().starts_with(configured.path()));
        temp.release();
    }

    #[test]
    fn test_acquire_defaults_to_platform_temp_dir() {
        let manager = TempFileManager::with_defaults();
        let temp = manager.acquire(None, "unit").unwrap();
        assert!(temp.path().starts_with(std::env::temp_dir()));
        temp.release();
    }

    #[test]
    fn test_acquire_creates_missing_root() {
        let parent = tempfile::tempdir().unwrap();
        let missing = parent.path().join("nested/spool");
        let manager = TempFileManager::new(Some(missing.clone()));

        let temp = manager.acquire(None, "unit").unwrap();
        assert!(temp.path().starts_with(&missing));
        temp.release();
    }

    #[test]
    fn test_acquire_unique_names() {
        let root = tempfile::tempdir().unwrap();
        let manager = TempFileManager::new(Some(root.path().to_path_buf()));

        let first = manager.acquire(None, "unit").unwrap();
        let second = manager.acquire(None, "unit").unwrap();
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn test_release_removes_file_and_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let manager = TempFileManager::new(Some(root.path().to_path_buf()));

        let temp = manager.acquire(None, "unit").unwrap();
        let path = temp.path().to_path_buf();
        assert!(path.exists());

        // Remove behind the manager's back; release must not fail.
        std::fs::remove_file(&path).unwrap();
        temp.release();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_file() {
        let root = tempfile::tempdir().unwrap();
        let manager = TempFileManager::new(Some(root.path().to_path_buf()));

        let path = {
            let temp = manager.acquire(None, "unit").unwrap();
            temp.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_materialize_buffer() {
        let root = tempfile::tempdir().unwrap();
        let manager = TempFileManager::new(Some(root.path().to_path_buf()));
        let binary = MediaBinary::from_buffer(b"bytes".to_vec(), "image/jpeg", None);

        let temp = manager.acquire(None, "unit").unwrap();
        manager.materialize(&binary, &temp).await.unwrap();
        assert_eq!(std::fs::read(temp.path()).unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn test_materialize_copies_file_backed_payloads() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("source.jpg");
        std::fs::write(&source, b"source content").unwrap();

        let manager = TempFileManager::new(Some(root.path().to_path_buf()));
        let binary = MediaBinary::from_file(&source, "image/jpeg", None);

        let temp = manager.acquire(None, "unit").unwrap();
        manager.materialize(&binary, &temp).await.unwrap();

        assert_eq!(std::fs::read(temp.path()).unwrap(), b"source content");
        // The source payload itself is untouched.
        assert_eq!(std::fs::read(&source).unwrap(), b"source content");
    }
}
