//! Workflow context
//!
//! This module defines the state collected while a run progresses.

use super::plan::PlannedDownload;

/// Context for the workflow
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    /// Whether the run only previewed its downloads
    pub dry_run: bool,
    /// Statistics about the processing
    pub stats: WorkflowStats,
    /// Download plan, one entry per found file in search order
    pub planned_downloads: Vec<PlannedDownload>,
}

/// Statistics about the workflow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowStats {
    /// Number of files the search returned
    pub files_found: usize,
    /// Number of destinations rewritten by the path transformer
    pub files_transformed: usize,
    /// Number of files that kept their original path after a failed transformation
    pub transform_fallbacks: usize,
    /// Number of files downloaded
    pub files_downloaded: usize,
    /// Number of errors
    pub errors: usize,
}

impl WorkflowContext {
    /// Creates a new workflow context
    pub fn new(dry_run: bool) -> Self {
        WorkflowContext {
            dry_run,
            ..WorkflowContext::default()
        }
    }

    /// Whether any file failed during the run
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }
}
