//! Constants used throughout the application
//!
//! This module centralises all constants used in the application to make
//! them easier to manage and update.

/// Qualifier string used for application identification
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "drive_fetch";

/// Application name used for identification
///
/// This is used to locate the platform configuration directory.
pub const APPLICATION: &str = "drive_fetch";

/// Name of the configuration file looked up in the configuration directory
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Storage root used when none is configured
pub const DEFAULT_SOURCE: &str = ".";

/// Download directory used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Help text for the pattern command-line option
pub const PATTERN_HELP: &str = "Regex pattern to match file names";

/// Help text for the source command-line option
pub const SOURCE_HELP: &str = "Root directory of the storage tree to search";

/// Help text for the folder-id command-line option
pub const FOLDER_ID_HELP: &str = "Folder to start the search from (defaults to the storage root)";

/// Help text for the max-depth command-line option
pub const MAX_DEPTH_HELP: &str = "Maximum folder depth to search (-1 for unlimited)";

/// Help text for the max command-line option
pub const MAX_RESULTS_HELP: &str = "Maximum number of files to return (0 for unlimited)";

/// Help text for the dry-run command-line option
pub const DRY_RUN_HELP: &str = "Only list files and preview destinations, don't download";

/// Help text for the output-dir command-line option
pub const OUTPUT_DIR_HELP: &str = "Directory to save downloaded files";

/// Help text for the path-pattern command-line option
pub const PATH_PATTERN_HELP: &str = "Regex pattern with named groups to transform output paths \
     (e.g. 'Zoom Recordings/(?P<date>[^/]+)/.*\\.TRANSCRIPT')";

/// Help text for the path-format command-line option
pub const PATH_FORMAT_HELP: &str =
    "Format string for transformed paths using named groups (e.g. '${date}.TRANSCRIPT')";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read settings from a specific config file";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Also write log messages to this file";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";
