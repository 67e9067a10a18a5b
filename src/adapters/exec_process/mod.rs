//! Remux plan execution adapter
//!
//! Runs a [`RemuxPlan`] step by step: file operations go through the injected
//! [`FsPort`], the remux tool runs as a child process with inherited output so
//! its progress stays visible. When the remux fails or leaves no usable
//! output the renamed original is moved back and nothing is deleted.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::planner::{PlanStep, RemuxPlan};
use crate::ports::*;

/// Child-process based execution adapter
pub struct ProcessExecAdapter {
    fs_port: Arc<dyn FsPort>,
}

impl ProcessExecAdapter {
    pub fn new(fs_port: Arc<dyn FsPort>) -> Self {
        Self { fs_port }
    }

    async fn run_remux(&self, program: &str, args: &[std::ffi::OsString]) -> Result<(), String> {
        debug!(program, "running remux");
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| format!("failed to run {}: {}", program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", program, status))
        }
    }

    /// Put the original back where it was, dropping any partial output
    async fn roll_back(&self, plan: &RemuxPlan, output: &Path) {
        if let Ok(Some(_)) = self.fs_port.file_size(output).await {
            if let Err(e) = self.fs_port.delete_file(output).await {
                warn!("Could not remove partial output: {}", e);
            }
        }
        match self.fs_port.move_file(&plan.original, &plan.input).await {
            Ok(()) => info!("Restored original {}", plan.input.display()),
            Err(e) => error!(
                "Could not restore original, it remains at {}: {}",
                plan.original.display(),
                e
            ),
        }
    }
}

#[async_trait]
impl ExecutePort for ProcessExecAdapter {
    async fn execute_plan(&self, plan: &RemuxPlan) -> Result<ExecutionReport, DomainError> {
        let path = plan.input.display().to_string();
        let mut report = ExecutionReport {
            output: plan.input.clone(),
            output_size: 0,
            original_retained: false,
        };

        for step in &plan.steps {
            match step {
                PlanStep::Rename { from, to } => {
                    // A leftover target marks an interrupted run and may be the only full copy
                    let existing = self
                        .fs_port
                        .file_size(to)
                        .await
                        .map_err(|e| DomainError::execution(&path, e.to_string()))?;
                    if existing.is_some() {
                        return Err(DomainError::execution(
                            &path,
                            format!(
                                "{} already exists, previous run incomplete",
                                to.display()
                            ),
                        ));
                    }
                    self.fs_port
                        .move_file(from, to)
                        .await
                        .map_err(|e| DomainError::execution(&path, e.to_string()))?;
                    report.original_retained = true;
                }
                PlanStep::Remux {
                    program,
                    args,
                    output,
                } => {
                    if let Err(message) = self.run_remux(program, args).await {
                        self.roll_back(plan, output).await;
                        return Err(DomainError::execution(&path, message));
                    }
                    match self.fs_port.file_size(output).await {
                        Ok(Some(size)) if size > 0 => {
                            report.output = output.clone();
                            report.output_size = size;
                        }
                        _ => {
                            self.roll_back(plan, output).await;
                            return Err(DomainError::execution(
                                &path,
                                format!("{} produced no output", program),
                            ));
                        }
                    }
                }
                PlanStep::RestoreMtime { reference, target } => {
                    if let Err(e) = self.fs_port.copy_mtime(reference, target).await {
                        warn!("Could not restore modification time: {}", e);
                    }
                }
                PlanStep::Delete { path: original } => {
                    match self.fs_port.delete_file(original).await {
                        Ok(()) => report.original_retained = false,
                        Err(e) => warn!("Could not delete {}: {}", original.display(), e),
                    }
                }
            }
        }

        Ok(report)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::adapters::LocalFsAdapter;
    use crate::domain::rules::SelectionResult;
    use crate::planner::PlanOptions;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn plan(input: &Path, ffmpeg: &str, keep_original: bool) -> RemuxPlan {
        let selection = SelectionResult {
            primary_video: Some(0),
            kept_indexes: vec![1],
            discarded_indexes: vec![2],
            ..Default::default()
        };
        let options = PlanOptions {
            ffmpeg: ffmpeg.to_string(),
            keep_original,
        };
        RemuxPlan::build(input, &selection, &options).unwrap()
    }

    fn adapter() -> ProcessExecAdapter {
        ProcessExecAdapter::new(Arc::new(LocalFsAdapter::new()))
    }

    fn setup() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("movie.mkv");
        fs::write(&input, b"original").unwrap();
        (dir, input)
    }

    #[tokio::test]
    async fn test_failed_remux_restores_original() {
        let (_dir, input) = setup();
        let plan = plan(&input, "false", false);
        let err = adapter().execute_plan(&plan).await.unwrap_err();
        assert!(matches!(err, DomainError::ExecutionError { .. }));
        assert_eq!(fs::read(&input).unwrap(), b"original");
        assert!(!plan.original.exists());
    }

    #[tokio::test]
    async fn test_leftover_original_is_never_overwritten() {
        let (_dir, input) = setup();
        let plan = plan(&input, "false", false);
        fs::write(&plan.original, b"complete copy").unwrap();

        let err = adapter().execute_plan(&plan).await.unwrap_err();
        assert!(err.to_string().contains("previous run incomplete"));
        assert_eq!(fs::read(&plan.original).unwrap(), b"complete copy");
        assert_eq!(fs::read(&input).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_missing_output_restores_original() {
        let (_dir, input) = setup();
        // Exits zero without writing anything
        let plan = plan(&input, "true", false);
        let err = adapter().execute_plan(&plan).await.unwrap_err();
        assert!(err.to_string().contains("produced no output"));
        assert_eq!(fs::read(&input).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_missing_remux_tool_restores_original() {
        let (_dir, input) = setup();
        let plan = plan(&input, "/nonexistent/thinmux-ffmpeg", true);
        assert!(adapter().execute_plan(&plan).await.is_err());
        assert_eq!(fs::read(&input).unwrap(), b"original");
        assert!(!plan.original.exists());
    }

    #[tokio::test]
    async fn test_rename_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let plan = plan(&dir.path().join("absent.mkv"), "true", false);
        let err = adapter().execute_plan(&plan).await.unwrap_err();
        assert!(matches!(err, DomainError::ExecutionError { .. }));
    }
}
