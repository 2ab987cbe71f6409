//! Workflow module
//!
//! This module contains components for orchestrating a fetch run.

mod context;
mod engine;
mod plan;

pub use context::{WorkflowContext, WorkflowStats};
pub use engine::run;
pub use plan::{PathOutcome, PlannedDownload, plan_downloads};
