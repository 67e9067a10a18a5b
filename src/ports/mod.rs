// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::planner::RemuxPlan;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file and return its raw stream records
    async fn probe_media(&self, path: &Path) -> Result<ProbeReport, DomainError>;
}

/// Port for running remux plans
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run every step of the plan in order
    async fn execute_plan(&self, plan: &RemuxPlan) -> Result<ExecutionReport, DomainError>;
}

/// Result of a successful plan execution
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    pub output: PathBuf,
    pub output_size: u64,
    /// The renamed original is still on disk
    pub original_retained: bool,
}

/// What a user-supplied path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    Missing,
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Classify a path as file, directory or neither
    async fn path_kind(&self, path: &Path) -> PathKind;

    /// Recursively list media files under `root` with one of `extensions`
    async fn discover_media(
        &self,
        root: &Path,
        extensions: &[String],
    ) -> Result<Vec<PathBuf>, DomainError>;

    /// Make a path absolute without resolving symlinks
    async fn absolute(&self, path: &Path) -> Result<PathBuf, DomainError>;

    /// Move a file atomically within one file system
    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;

    /// Copy the modification time of `reference` onto `target`
    async fn copy_mtime(&self, reference: &Path, target: &Path) -> Result<(), DomainError>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> Result<(), DomainError>;

    /// Size of a file, `None` when it does not exist
    async fn file_size(&self, path: &Path) -> Result<Option<u64>, DomainError>;
}
