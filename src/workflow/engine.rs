//! Workflow engine
//!
//! This module contains the engine that orchestrates a fetch run.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use log::{debug, error, info, warn};
use regex::Regex;

use crate::config::Config;
use crate::errors::invalid_pattern_error;
use crate::logging::format_message;
use crate::storage::{StorageClient, local_destination, search_files};
use crate::transform::PathTransformer;

use super::context::WorkflowContext;
use super::plan::{PathOutcome, PlannedDownload, plan_downloads};

/// Runs a fetch against a storage client
///
/// This function orchestrates the workflow steps:
/// 1. Compile the file name pattern and the optional path transformer
/// 2. Search the storage tree for matching files
/// 3. Plan the destination of every file, falling back to the original path
///    when the transformer fails for it
/// 4. Preview the plan (dry run) or download every file
///
/// # Arguments
/// * `client` - The storage client to search and download from
/// * `config` - A validated configuration
///
/// # Returns
/// * `Result<WorkflowContext>` - The workflow context with statistics or an error
///
/// # Errors
/// * Returns an error if a pattern or the path transformer is invalid
/// * Returns an error if the search fails
/// * Returns an error if the output directory is the storage root
///
/// Failed downloads are logged and counted in the context, not returned. An
/// output directory inside the storage is left out of the search.
pub fn run<C: StorageClient + ?Sized>(client: &C, config: &Config) -> Result<WorkflowContext> {
    config.validate()?;

    let name_pattern =
        Regex::new(&config.pattern).map_err(|e| invalid_pattern_error(e, &config.pattern))?;

    let transformer = match config.path_transform() {
        Some((pattern, format)) => Some(build_transformer(pattern, format)?),
        None => None,
    };

    let mut context = WorkflowContext::new(config.dry_run);

    let mut search_options = config.search_options();
    if let Some(output_id) = client.local_folder_id(&config.output_dir) {
        if output_id.is_empty() {
            return Err(anyhow!(
                "Output directory {} must not be the storage root",
                config.output_dir.display()
            ));
        }
        debug!("Excluding output directory '{output_id}' from the search");
        search_options.excluded_folders.push(output_id);
    }

    let files = search_files(
        client,
        config.folder_id.as_deref(),
        &name_pattern,
        &search_options,
    )?;
    context.stats.files_found = files.len();

    info!("Found {} matching files", files.len());
    for file in &files {
        info!(
            "- {} (Modified: {})",
            file.path,
            file.modified.format("%Y-%m-%d %H:%M:%S")
        );
    }

    if files.is_empty() {
        return Ok(context);
    }

    context.planned_downloads = plan_downloads(files, transformer.as_ref());
    for planned in &context.planned_downloads {
        match planned.outcome {
            PathOutcome::Transformed => context.stats.files_transformed += 1,
            PathOutcome::Fallback(_) => context.stats.transform_fallbacks += 1,
            PathOutcome::Failed(_) => context.stats.errors += 1,
            PathOutcome::Unchanged => {}
        }
    }

    if config.dry_run {
        preview(&context.planned_downloads, config);
        info!("Dry run completed. No files were downloaded.");
        return Ok(context);
    }

    download_all(client, config, &mut context);

    info!(
        "Downloaded {} of {} files ({} transformed, {} kept their original path, {} errors)",
        context.stats.files_downloaded,
        context.stats.files_found,
        context.stats.files_transformed,
        context.stats.transform_fallbacks,
        context.stats.errors
    );

    Ok(context)
}

fn build_transformer(pattern: &str, format: &str) -> Result<PathTransformer> {
    let transformer =
        PathTransformer::new(pattern, format).context("Error creating path transformer")?;

    let undeclared = transformer.undeclared_placeholders();
    if !undeclared.is_empty() {
        warn!(
            "Path format references names the pattern never captures ({}); those files will keep their original path",
            undeclared.join(", ")
        );
    }

    debug!(
        "Path transformer ready: pattern {:?}, format {:?}",
        transformer.pattern(),
        transformer.template()
    );
    Ok(transformer)
}

fn preview(planned_downloads: &[PlannedDownload], config: &Config) {
    info!("Download preview:");

    for planned in planned_downloads {
        info!("Original file: {}", planned.file.path);

        match &planned.outcome {
            PathOutcome::Unchanged => {}
            PathOutcome::Transformed => {
                let message = format!("  Transformed to: {}", planned.destination);
                let colored_message = format!("  Transformed to: {}", planned.destination.green());
                info!("{}", format_message(&message, &colored_message));
            }
            PathOutcome::Fallback(reason) => {
                let message = format!("  Transformation failed: {reason}");
                let colored_message = format!("  Transformation failed: {}", reason.red());
                info!("{}", format_message(&message, &colored_message));
            }
            PathOutcome::Failed(reason) => {
                warn!("  Will be skipped: {reason}");
                continue;
            }
        }

        match local_destination(&config.output_dir, &planned.destination) {
            Ok(path) => info!("  Will be saved as: {}", path.display()),
            Err(e) => warn!("  Will be skipped: {e}"),
        }
    }
}

fn download_all<C: StorageClient + ?Sized>(
    client: &C,
    config: &Config,
    context: &mut WorkflowContext,
) {
    let total = context.planned_downloads.len();
    info!("Starting download of {total} files...");

    for (index, planned) in context.planned_downloads.iter().enumerate() {
        if let PathOutcome::Failed(_) = planned.outcome {
            debug!("Skipping {}, its path could not be planned", planned.file.path);
            continue;
        }
        info!("Downloading {}/{}: {}", index + 1, total, planned.destination);

        let result = local_destination(&config.output_dir, &planned.destination)
            .and_then(|path| client.download(&planned.file, &path));

        match result {
            Ok(()) => context.stats.files_downloaded += 1,
            Err(e) => {
                error!("Error downloading {}: {e}", planned.file.path);
                context.stats.errors += 1;
            }
        }
    }
}
