//! Report rendering for the batch

pub mod report;

pub use report::{render_file_block, BatchReport, ChangeStatus, ChangedFile};
