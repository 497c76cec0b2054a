//! File operations

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::WatchError;

/// A file wrapper with path
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a new file reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read file contents as string, `None` when the file is absent
    pub async fn read_string_opt(&self) -> Result<Option<String>, WatchError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write JSON to file, replacing any previous content atomically
    pub async fn write_json_atomic<T: Serialize>(&self, value: &T) -> Result<(), WatchError> {
        let mut contents = serde_json::to_vec_pretty(value)?;
        contents.push(b'\n');
        self.write_atomic(&contents).await
    }

    /// Atomic write using a temporary file in the same directory
    pub async fn write_atomic(&self, contents: &[u8]) -> Result<(), WatchError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.temp_path();

        if let Err(e) = Self::write_and_rename(&temp_path, &self.path, contents).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn write_and_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(temp_path, path).await
    }

    /// Delete the file. Returns whether a file was actually removed.
    pub async fn delete(&self) -> Result<bool, WatchError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
