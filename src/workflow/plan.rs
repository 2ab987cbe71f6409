//! Download planning
//!
//! Decides the destination path of every found file, applying the path
//! transformer when one is configured.

use log::{debug, error, warn};
use rayon::prelude::*;

use crate::errors::Result;
use crate::storage::RemoteFile;
use crate::transform::PathTransformer;

/// How the destination path of a file was decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// No transformer configured, the original path is kept
    Unchanged,
    /// The transformer rewrote the path
    Transformed,
    /// The transformer could not handle this file; the original path is kept
    Fallback(String),
    /// The transformer failed for a reason unrelated to this file; it is skipped
    Failed(String),
}

/// A file together with the path it will be saved under
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDownload {
    pub file: RemoteFile,
    /// Destination relative to the output directory, forward-slash separated
    pub destination: String,
    pub outcome: PathOutcome,
}

/// Plans the destination of every file
///
/// Files are planned in parallel against the shared transformer; the result
/// keeps the order of `files`. A file whose path cannot be transformed falls
/// back to its original path and never affects the others. Errors that are not
/// about the file itself mark it as failed instead.
pub fn plan_downloads(
    files: Vec<RemoteFile>,
    transformer: Option<&PathTransformer>,
) -> Vec<PlannedDownload> {
    files
        .into_par_iter()
        .map(|file| plan_download(file, transformer))
        .collect()
}

fn plan_download(file: RemoteFile, transformer: Option<&PathTransformer>) -> PlannedDownload {
    let Some(transformer) = transformer else {
        return PlannedDownload {
            destination: file.path.clone(),
            file,
            outcome: PathOutcome::Unchanged,
        };
    };

    let result = transformer.transform(&file.path);
    planned_from(file, result)
}

fn planned_from(file: RemoteFile, result: Result<String>) -> PlannedDownload {
    match result {
        Ok(destination) => {
            debug!("Transformed '{}' to '{}'", file.path, destination);
            PlannedDownload {
                destination,
                file,
                outcome: PathOutcome::Transformed,
            }
        }
        Err(e) if e.is_per_item() => {
            warn!("Could not transform path, keeping original: {e}");
            PlannedDownload {
                destination: file.path.clone(),
                file,
                outcome: PathOutcome::Fallback(e.to_string()),
            }
        }
        Err(e) => {
            error!("Could not transform path of {}: {e}", file.path);
            PlannedDownload {
                destination: file.path.clone(),
                file,
                outcome: PathOutcome::Failed(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::errors::{invalid_arguments_error, no_match_error};

    fn remote_file(path: &str) -> RemoteFile {
        RemoteFile {
            id: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            modified: Utc::now(),
        }
    }

    #[test]
    fn test_plan_without_transformer_keeps_paths() {
        let plan = plan_downloads(vec![remote_file("a/b.txt")], None);
        assert_eq!(plan[0].destination, "a/b.txt");
        assert_eq!(plan[0].outcome, PathOutcome::Unchanged);
    }

    #[test]
    fn test_plan_falls_back_per_file() {
        let transformer =
            PathTransformer::new(r"^(?P<dir>[^/]+)/.*\.txt$", "${dir}.txt").unwrap();
        let files = vec![
            remote_file("first/a.txt"),
            remote_file("b.bin"),
            remote_file("third/c.txt"),
        ];

        let plan = plan_downloads(files, Some(&transformer));

        let destinations: Vec<&str> = plan.iter().map(|p| p.destination.as_str()).collect();
        assert_eq!(destinations, vec!["first.txt", "b.bin", "third.txt"]);
        assert_eq!(plan[0].outcome, PathOutcome::Transformed);
        assert!(matches!(plan[1].outcome, PathOutcome::Fallback(_)));
        assert_eq!(plan[2].outcome, PathOutcome::Transformed);
    }

    #[test]
    fn test_plan_marks_non_item_errors_as_failed() {
        let planned = planned_from(
            remote_file("a/b.txt"),
            Err(invalid_arguments_error("both pattern and format must be non-empty")),
        );
        assert_eq!(planned.destination, "a/b.txt");
        assert!(matches!(planned.outcome, PathOutcome::Failed(_)));

        let planned = planned_from(
            remote_file("a/b.txt"),
            Err(no_match_error("^x$", "a/b.txt")),
        );
        assert!(matches!(planned.outcome, PathOutcome::Fallback(_)));
    }
}
