use regex::Error as RegexError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the Drive Fetch application
#[derive(Debug)]
pub enum Error {
    /// Pattern or template was empty when building a transformer
    InvalidArguments { detail: String },
    /// Error related to compiling a regular expression
    InvalidPattern { source: RegexError, pattern: String },
    /// The template references none of the pattern's named groups
    TemplateUnused { pattern: String, template: String },
    /// Error when a path does not match a pattern
    NoMatch { pattern: String, input: String },
    /// A `${name}` placeholder survived substitution
    UnresolvedPlaceholder { result: String },
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Error related to path operations
    PathOperation { path: PathBuf, operation: String },
    /// Error related to configuration parsing
    ConfigParsing {
        source: Box<dyn StdError + Send + Sync>,
        detail: String,
    },
    /// A remote path that would land outside the output directory
    UnsafePath { path: String },
}

impl Error {
    /// Whether the error concerns a single input path rather than the whole run.
    ///
    /// Per-item failures are expected during a run; the caller decides whether
    /// to skip the item or fall back to its original path.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            Error::NoMatch { .. } | Error::UnresolvedPlaceholder { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArguments { detail } => {
                write!(f, "Invalid arguments: {detail}")
            }
            Error::InvalidPattern { source, pattern } => {
                write!(f, "Invalid regex pattern '{pattern}': {source}")
            }
            Error::TemplateUnused { pattern, template } => {
                write!(
                    f,
                    "Format string '{template}' does not reference any captured variable of '{pattern}'"
                )
            }
            Error::NoMatch { pattern, input } => {
                write!(f, "Path '{input}' does not match pattern '{pattern}'")
            }
            Error::UnresolvedPlaceholder { result } => {
                write!(f, "Some placeholders were not replaced: {result}")
            }
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::PathOperation { path, operation } => {
                write!(f, "Failed to {} path: {}", operation, path.display())
            }
            Error::ConfigParsing { detail, .. } => {
                write!(f, "Configuration parsing error: {detail}")
            }
            Error::UnsafePath { path } => {
                write!(f, "Refusing to write outside the output directory: {path}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidPattern { source, .. } => Some(source),
            Error::FileOperation { source, .. } => Some(source),
            Error::ConfigParsing { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Custom Result type for the Drive Fetch application
///
/// # Examples
/// ```
/// use drive_fetch::prelude::{Result, invalid_arguments_error};
///
/// fn require_format(format: &str) -> Result<&str> {
///     if format.is_empty() {
///         return Err(invalid_arguments_error("format must be non-empty"));
///     }
///     Ok(format)
/// }
/// # assert!(require_format("${date}.txt").is_ok());
/// # assert!(require_format("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an invalid arguments error
pub fn invalid_arguments_error(detail: &str) -> Error {
    Error::InvalidArguments {
        detail: detail.to_string(),
    }
}

/// Helper function to create an invalid pattern error
pub fn invalid_pattern_error(err: RegexError, pattern: &str) -> Error {
    Error::InvalidPattern {
        source: err,
        pattern: pattern.to_string(),
    }
}

/// Helper function to create a template unused error
pub fn template_unused_error(pattern: &str, template: &str) -> Error {
    Error::TemplateUnused {
        pattern: pattern.to_string(),
        template: template.to_string(),
    }
}

/// Helper function to create a no-match error
pub fn no_match_error(pattern: &str, input: &str) -> Error {
    Error::NoMatch {
        pattern: pattern.to_string(),
        input: input.to_string(),
    }
}

/// Helper function to create an unresolved placeholder error
pub fn unresolved_placeholder_error(result: &str) -> Error {
    Error::UnresolvedPlaceholder {
        result: result.to_string(),
    }
}

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a path operation error
pub fn path_operation_error(path: PathBuf, operation: &str) -> Error {
    Error::PathOperation {
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a config parsing error
pub fn config_parsing_error<E: StdError + Send + Sync + 'static>(err: E, detail: &str) -> Error {
    Error::ConfigParsing {
        source: Box::new(err),
        detail: detail.to_string(),
    }
}

/// Helper function to create an unsafe path error
pub fn unsafe_path_error(path: &str) -> Error {
    Error::UnsafePath {
        path: path.to_string(),
    }
}
