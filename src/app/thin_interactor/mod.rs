// Thin interactor - Orchestrates the probe, select, plan and execute use case

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::classify_streams;
use crate::domain::rules::{SelectionPolicy, SelectionResult};
use crate::planner::{PlanOptions, RemuxPlan};
use crate::ports::*;

/// What happened to one file of the batch
#[derive(Debug)]
pub enum FileOutcome {
    /// Nothing to discard and nothing to convert
    NoChange { selection: SelectionResult },
    /// Discards exist but free too little space; never executed
    BelowThreshold {
        selection: SelectionResult,
        plan: RemuxPlan,
    },
    /// A rewrite was planned, and executed when `execution` is set
    Planned {
        selection: SelectionResult,
        plan: RemuxPlan,
        execution: Option<Result<ExecutionReport, DomainError>>,
    },
}

impl FileOutcome {
    pub fn selection(&self) -> &SelectionResult {
        match self {
            FileOutcome::NoChange { selection }
            | FileOutcome::BelowThreshold { selection, .. }
            | FileOutcome::Planned { selection, .. } => selection,
        }
    }

    /// Execution was attempted and failed
    pub fn failed(&self) -> bool {
        matches!(
            self,
            FileOutcome::Planned {
                execution: Some(Err(_)),
                ..
            }
        )
    }
}

/// Interactor for the track-thinning use case
pub struct ThinInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    policy: SelectionPolicy,
    plan_options: PlanOptions,
    extensions: Vec<String>,
    execute: bool,
}

impl ThinInteractor {
    /// Create new thin interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        policy: SelectionPolicy,
        plan_options: PlanOptions,
        extensions: Vec<String>,
        execute: bool,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            fs_port,
            policy,
            plan_options,
            extensions,
            execute,
        }
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn executes(&self) -> bool {
        self.execute
    }

    /// Expand user-supplied paths into a sorted, deduplicated list of media files.
    ///
    /// Directories are scanned recursively; paths that are neither a file nor
    /// a directory are reported and skipped.
    pub async fn collect_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = BTreeSet::new();

        for path in paths {
            let absolute = match self.fs_port.absolute(path).await {
                Ok(absolute) => absolute,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            match self.fs_port.path_kind(&absolute).await {
                PathKind::File => {
                    files.insert(absolute);
                }
                PathKind::Directory => {
                    info!("Searching for video files in {} (recursive)", absolute.display());
                    match self.fs_port.discover_media(&absolute, &self.extensions).await {
                        Ok(found) => files.extend(found),
                        Err(e) => warn!("Could not scan {}: {}", absolute.display(), e),
                    }
                }
                PathKind::Missing => {
                    let err = DomainError::InvalidPath {
                        path: path.display().to_string(),
                    };
                    warn!("{}. Skipping.", err);
                }
            }
        }

        files.into_iter().collect()
    }

    /// Probe, select and plan one file, executing the plan in run mode
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome, DomainError> {
        let outcome = self.plan_file(path).await?;
        Ok(self.apply(outcome).await)
    }

    /// Probe, select and plan one file without touching it
    pub async fn plan_file(&self, path: &Path) -> Result<FileOutcome, DomainError> {
        debug!("processing {}", path.display());
        let report = self.probe_port.probe_media(path).await?;

        let (streams, untagged) = classify_streams(&report);
        if !untagged.is_empty() {
            debug!(?untagged, "streams without tags pass through untouched");
        }

        let selection = self.policy.select(&streams, &untagged);
        let Some(plan) = RemuxPlan::build(path, &selection, &self.plan_options) else {
            debug!("no unwanted streams in {}", path.display());
            return Ok(FileOutcome::NoChange { selection });
        };

        if !selection.worth_changing() {
            info!(
                bytes = selection.bytes_removed,
                "Below savings threshold, leaving {} alone",
                path.display()
            );
            return Ok(FileOutcome::BelowThreshold { selection, plan });
        }

        Ok(FileOutcome::Planned {
            selection,
            plan,
            execution: None,
        })
    }

    /// Execute a pending plan in run mode; every other outcome passes through
    pub async fn apply(&self, outcome: FileOutcome) -> FileOutcome {
        match outcome {
            FileOutcome::Planned {
                selection,
                plan,
                execution: None,
            } if self.execute => {
                info!("Rewriting {}", plan.input.display());
                let execution = self.execute_port.execute_plan(&plan).await;
                if let Err(e) = &execution {
                    error!("{}", e);
                }
                FileOutcome::Planned {
                    selection,
                    plan,
                    execution: Some(execution),
                }
            }
            other => other,
        }
    }
}
