// Local file system adapter

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use filetime::FileTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;

/// File name prefix of platform metadata files (AppleDouble) that are never media
pub const METADATA_PREFIX: &str = "._";

/// Local file system adapter
#[derive(Debug, Default, Clone)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Whether `path` looks like a media file we should process
    pub fn is_media_file(path: &Path, extensions: &[String]) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if name.starts_with(METADATA_PREFIX) {
            return false;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn fs_error(action: &str, path: &Path, err: std::io::Error) -> DomainError {
    DomainError::FsFail(format!("{} {}: {}", action, path.display(), err))
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn path_kind(&self, path: &Path) -> PathKind {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => PathKind::Directory,
            Ok(meta) if meta.is_file() => PathKind::File,
            _ => PathKind::Missing,
        }
    }

    async fn discover_media(
        &self,
        root: &Path,
        extensions: &[String],
    ) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if Self::is_media_file(entry.path(), extensions) {
                files.push(entry.into_path());
            } else {
                debug!("ignoring {}", entry.path().display());
            }
        }
        files.sort();
        Ok(files)
    }

    async fn absolute(&self, path: &Path) -> Result<PathBuf, DomainError> {
        std::path::absolute(path).map_err(|e| fs_error("cannot resolve", path, e))
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        tokio::fs::rename(from, to)
            .await
            .map_err(|e| fs_error("cannot move", from, e))
    }

    async fn copy_mtime(&self, reference: &Path, target: &Path) -> Result<(), DomainError> {
        let meta = tokio::fs::metadata(reference)
            .await
            .map_err(|e| fs_error("cannot read", reference, e))?;
        let mtime = FileTime::from_last_modification_time(&meta);
        filetime::set_file_mtime(target, mtime).map_err(|e| fs_error("cannot touch", target, e))
    }

    async fn delete_file(&self, path: &Path) -> Result<(), DomainError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| fs_error("cannot delete", path, e))
    }

    async fn file_size(&self, path: &Path) -> Result<Option<u64>, DomainError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(Some(meta.len())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(fs_error("cannot stat", path, e)),
        }
    }
}
