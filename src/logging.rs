//! Logging setup
//!
//! Console output goes to stdout, coloured by level when stdout is a
//! terminal. A log file, when requested, receives the same records with a
//! timestamp and the emitting module.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Verbosity selected with the `-v` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    /// Default: search results, plan and download progress
    Info,
    /// Per-file decisions (`-v`)
    Debug,
    /// Folder traversal (`-vv`)
    Trace,
}

impl LogLevel {
    /// The `log` filter for this verbosity
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Maps the number of `-v` flags to a verbosity
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Installs the global logger
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is already set
pub fn init_logger(verbosity: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let level = verbosity.to_level_filter();
    let mut dispatch = Dispatch::new().level(level).chain(console_dispatch());

    if let Some(path) = log_file {
        dispatch = dispatch.chain(file_dispatch(path)?);
    }

    dispatch.apply().context("Failed to install logger")?;

    log::debug!("Logger initialized with verbosity level: {verbosity:?}");
    Ok(())
}

fn console_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);
    let use_colors = atty::is(atty::Stream::Stdout);

    Dispatch::new()
        .format(move |out, message, record| {
            if use_colors {
                out.finish(format_args!(
                    "\x1B[{}m{}\x1B[0m",
                    colors.get_color(&record.level()).to_fg_str(),
                    message
                ))
            } else {
                out.finish(format_args!("{message}"))
            }
        })
        .chain(std::io::stdout())
}

fn file_dispatch(path: &Path) -> Result<Dispatch> {
    let file = fern::log_file(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(file))
}

/// Picks the coloured variant of a message when stdout is a terminal
pub fn format_message(message: &str, colored_message: &str) -> String {
    if atty::is(atty::Stream::Stdout) {
        colored_message.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_log_level_to_level_filter() {
        assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warning.to_level_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_log_level_from_occurrences() {
        assert_eq!(LogLevel::from_occurrences(0), LogLevel::Info);
        assert_eq!(LogLevel::from_occurrences(1), LogLevel::Debug);
        assert_eq!(LogLevel::from_occurrences(2), LogLevel::Trace);
        assert_eq!(LogLevel::from_occurrences(255), LogLevel::Trace);
    }

    #[test]
    fn test_file_dispatch_reports_unopenable_path() {
        let temp_dir = tempdir().unwrap();
        let result = file_dispatch(&temp_dir.path().join("missing/dir/dfetch.log"));
        let error = result.err().expect("opening a log file in a missing directory should fail");
        assert!(error.to_string().contains("Failed to open log file"));
    }

    #[test]
    fn test_format_message() {
        // Depends on whether stdout is a terminal, so accept either branch
        let plain_message = "Test message";
        let colored_message = "\x1B[32mTest message\x1B[0m";

        let result = format_message(plain_message, colored_message);
        assert!(result == plain_message || result == colored_message);
    }
}
