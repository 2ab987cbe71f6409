//! Recursive search over a storage client
//!
//! Walks folders depth-first, keeps the files whose names match a pattern and
//! records the folder path that leads to each of them.

use log::{debug, trace};
use regex::Regex;

use crate::errors::Result;

use super::{EntryKind, RemoteFile, StorageClient};

/// Limits applied to a search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Deepest folder level to enter; the start folder is level 0. `None` is unlimited.
    pub max_depth: Option<usize>,
    /// Maximum number of files to return. `None` is unlimited.
    pub max_results: Option<usize>,
    /// Folder ids never entered, such as the download directory
    pub excluded_folders: Vec<String>,
}

impl SearchOptions {
    fn is_full(&self, found: usize) -> bool {
        self.max_results.is_some_and(|max| found >= max)
    }

    fn is_excluded(&self, folder_id: &str) -> bool {
        self.excluded_folders.iter().any(|id| id == folder_id)
    }
}

/// Searches a storage tree for files whose names match `name_pattern`
///
/// The result is ordered by modification time, newest first, and holds at
/// most `options.max_results` files.
///
/// # Arguments
/// * `client` - The storage client to query
/// * `folder_id` - Folder to start from, or `None` for the client's root
/// * `name_pattern` - Pattern matched against each file name (not its path)
/// * `options` - Depth and result limits, folders to skip
///
/// # Errors
/// Returns an error if the root cannot be resolved or a folder cannot be listed
pub fn search_files<C: StorageClient + ?Sized>(
    client: &C,
    folder_id: Option<&str>,
    name_pattern: &Regex,
    options: &SearchOptions,
) -> Result<Vec<RemoteFile>> {
    debug!("Starting search with pattern: {}", name_pattern.as_str());

    let start = match folder_id {
        Some(id) => id.to_string(),
        None => {
            let root = client.root_id()?;
            debug!("No folder given, using root folder: '{root}'");
            root
        }
    };

    let mut files = Vec::new();
    search_folder(client, &start, "", name_pattern, options, 0, &mut files)?;

    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    if let Some(max) = options.max_results {
        files.truncate(max);
    }

    debug!("Search completed, {} matching files", files.len());
    Ok(files)
}

fn search_folder<C: StorageClient + ?Sized>(
    client: &C,
    folder_id: &str,
    parent_path: &str,
    name_pattern: &Regex,
    options: &SearchOptions,
    depth: usize,
    files: &mut Vec<RemoteFile>,
) -> Result<()> {
    if options.max_depth.is_some_and(|max| depth > max) {
        trace!("Reached max depth at '{parent_path}'");
        return Ok(());
    }
    if options.is_full(files.len()) {
        return Ok(());
    }
    if options.is_excluded(folder_id) {
        debug!("Skipping excluded folder '{parent_path}'");
        return Ok(());
    }

    let entries = client.list_folder(folder_id)?;
    trace!(
        "Entering '{}' (depth {}), {} entries",
        parent_path,
        depth,
        entries.len()
    );

    for entry in entries {
        if options.is_full(files.len()) {
            debug!("Reached max results, stopping search");
            return Ok(());
        }

        if entry.trashed {
            trace!("Skipping trashed entry: {}", entry.name);
            continue;
        }

        let current_path = if parent_path.is_empty() {
            entry.name.clone()
        } else {
            format!("{parent_path}/{}", entry.name)
        };

        match entry.kind {
            EntryKind::Folder => {
                search_folder(
                    client,
                    &entry.id,
                    &current_path,
                    name_pattern,
                    options,
                    depth + 1,
                    files,
                )?;
            }
            EntryKind::File if name_pattern.is_match(&entry.name) => {
                debug!("Found matching file: {current_path}");
                files.push(RemoteFile {
                    id: entry.id,
                    name: entry.name,
                    path: current_path,
                    modified: entry.modified,
                });
            }
            EntryKind::File => {}
        }
    }

    Ok(())
}
