//! Remux plan synthesis
//!
//! Turns a [`SelectionResult`] into the ordered sequence of operations that
//! rewrites one file: rename the original aside, remux it back into place,
//! carry over the modification time and remove the renamed original. The plan
//! is plain data; running it is the job of an [`ExecutePort`] adapter.
//!
//! [`ExecutePort`]: crate::ports::ExecutePort

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::rules::SelectionResult;
use crate::utils::shell;

pub mod mapping;

/// Suffix appended to the original file while the remux runs
pub const ORIGINAL_SUFFIX: &str = ".original";

/// Options that shape every plan of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    /// Remux tool executable
    pub ffmpeg: String,
    /// Leave `<file>.original` in place after a successful remux
    pub keep_original: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            keep_original: false,
        }
    }
}

/// One operation of a remux plan
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    /// Move a file within the same directory
    Rename { from: PathBuf, to: PathBuf },
    /// Run the remux tool; `output` is the file it is expected to produce
    Remux {
        program: String,
        args: Vec<OsString>,
        output: PathBuf,
    },
    /// Copy the modification time of `reference` onto `target`
    RestoreMtime { reference: PathBuf, target: PathBuf },
    /// Remove a file
    Delete { path: PathBuf },
}

impl PlanStep {
    /// Render as a shell command with every word quoted
    pub fn render(&self) -> String {
        match self {
            PlanStep::Rename { from, to } => shell::join(["mv".to_string(), lossy(from), lossy(to)]),
            PlanStep::Remux { program, args, .. } => {
                let mut words = vec![program.clone()];
                words.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
                shell::join(words)
            }
            PlanStep::RestoreMtime { reference, target } => {
                shell::join([
                    "touch".to_string(),
                    "-r".to_string(),
                    lossy(reference),
                    lossy(target),
                ])
            }
            PlanStep::Delete { path } => shell::join(["rm".to_string(), lossy(path)]),
        }
    }
}

/// Complete rewrite plan for one file
#[derive(Debug, Clone, PartialEq)]
pub struct RemuxPlan {
    pub input: PathBuf,
    pub original: PathBuf,
    pub steps: Vec<PlanStep>,
    pub converts: bool,
}

impl RemuxPlan {
    /// Build the plan for `input`, or `None` when the selection changes nothing
    pub fn build(input: &Path, selection: &SelectionResult, options: &PlanOptions) -> Option<Self> {
        if selection.is_noop() {
            return None;
        }

        let original = original_path(input);

        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-stats", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(original.clone().into_os_string());
        args.extend(mapping::stream_mapping(selection).into_iter().map(OsString::from));
        args.extend(mapping::codec_args(selection).into_iter().map(OsString::from));
        args.push(input.as_os_str().to_owned());

        let mut steps = vec![
            PlanStep::Rename {
                from: input.to_path_buf(),
                to: original.clone(),
            },
            PlanStep::Remux {
                program: options.ffmpeg.clone(),
                args,
                output: input.to_path_buf(),
            },
            PlanStep::RestoreMtime {
                reference: original.clone(),
                target: input.to_path_buf(),
            },
        ];
        if !options.keep_original {
            steps.push(PlanStep::Delete {
                path: original.clone(),
            });
        }

        Some(Self {
            input: input.to_path_buf(),
            original,
            steps,
            converts: selection.conversion_source.is_some(),
        })
    }

    /// The whole plan as one `&&`-chained shell line
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(PlanStep::render)
            .collect::<Vec<_>>()
            .join(" && ")
    }
}

/// `<file>.original` next to `input`
pub fn original_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(ORIGINAL_SUFFIX);
    PathBuf::from(name)
}

fn lossy(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
