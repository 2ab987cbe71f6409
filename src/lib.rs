//! Drive Fetch
//!
//! Searches a storage tree for files whose names match a pattern, optionally
//! rewrites their destination paths with a named-group pattern and a
//! `${name}` format template, and downloads them preserving structure.

pub use errors::{Error, Result};

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod storage;
pub mod transform;
pub mod workflow;

pub mod prelude {
    pub use crate::config::{Config, resolve_config};
    pub use crate::errors::{
        config_parsing_error, file_operation_error, invalid_arguments_error,
        invalid_pattern_error, no_match_error, path_operation_error, template_unused_error,
        unresolved_placeholder_error, unsafe_path_error,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::storage::{LocalStorage, SearchOptions, StorageClient, search_files};
    pub use crate::transform::PathTransformer;
    pub use crate::workflow::{WorkflowContext, run};
}
