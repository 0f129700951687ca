use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::UploadedFile;
use crate::services::sanitize::secure_filename;

/// The staging and translations directories.
#[derive(Debug, Clone)]
pub struct WorkDirs {
    upload_dir: PathBuf,
    translations_dir: PathBuf,
}

impl WorkDirs {
    pub fn new(upload_dir: impl Into<PathBuf>, translations_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            translations_dir: translations_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.upload_dir, &config.translations_dir)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn translations_dir(&self) -> &Path {
        &self.translations_dir
    }

    /// Creates both directories if they are missing. Safe to call on every request.
    pub async fn ensure(&self) -> AppResult<()> {
        for dir in [&self.upload_dir, &self.translations_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                AppError::internal(format!("Failed to create directory {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    /// Writes the upload into the staging directory under its sanitized name.
    ///
    /// An existing file with the same name is overwritten.
    pub async fn stage(&self, file: &UploadedFile) -> AppResult<StagedFile> {
        let path = self.upload_dir.join(&file.name);
        tokio::fs::write(&path, &file.content).await.map_err(|e| {
            AppError::internal(format!("Failed to save uploaded file {}: {}", file.name, e))
        })?;

        if file.name != file.original_name {
            info!(
                original_name = %file.original_name,
                staged_name = %file.name,
                "Upload name sanitized for staging"
            );
        }
        debug!(path = %path.display(), size = file.size, "Upload staged");
        Ok(StagedFile::new(path))
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.translations_dir.join(file_name)
    }

    /// Resolves a download request to an existing output file.
    ///
    /// The name is sanitized again before it touches the filesystem.
    pub async fn locate_output(&self, requested: &str) -> Option<(String, PathBuf)> {
        let file_name = secure_filename(requested);
        if file_name.is_empty() {
            return None;
        }

        let path = self.translations_dir.join(&file_name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some((file_name, path)),
            _ => None,
        }
    }
}

/// A staged upload, removed from disk when dropped unless already discarded.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    armed: bool,
}

impl StagedFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the staged file now.
    pub async fn discard(mut self) {
        self.armed = false;
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "Failed to remove staged file");
            }
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Staged file cleaned up"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to clean up staged file"),
        }
    }
}
