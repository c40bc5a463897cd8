//! Real file system implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use courier_application::ports::{FileSystem, FileSystemError, StoredFile};
use tokio::fs;
use tracing::warn;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io_error(path: &Path, error: std::io::Error) -> FileSystemError {
    match error.kind() {
        ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
        ErrorKind::InvalidData => FileSystemError::InvalidUtf8(path.to_path_buf()),
        _ => FileSystemError::Io(error),
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::remove_file(path)
            .await
            .map_err(|e| map_io_error(path, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<StoredFile>, FileSystemError> {
        let metadata = fs::metadata(dir).await.map_err(|e| map_io_error(dir, e))?;
        if !metadata.is_dir() {
            return Err(FileSystemError::NotADirectory(dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            let mut entries = fs::read_dir(&current)
                .await
                .map_err(|e| map_io_error(&current, e))?;
            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    paths.push(entry.path());
                }
            }
        }

        paths.sort(); // Deterministic ordering
        let mut files = Vec::with_capacity(paths.len());
        for file_path in paths {
            match self.read_file_string(&file_path).await {
                Ok(content) => files.push(StoredFile { file_path, content }),
                // Binary siblings (images, .DS_Store) cannot be documents
                Err(FileSystemError::InvalidUtf8(_)) => {
                    warn!(path = %file_path.display(), "skipping file that is not valid UTF-8");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(files)
    }
}
