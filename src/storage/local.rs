//! Local directory backend
//!
//! Serves a directory tree (for example a synced cloud drive folder) through
//! the [`StorageClient`] trait. Identifiers are forward-slash paths relative to
//! the storage root, with the root itself being the empty string.
//!
//! Symlinked files are listed as the file they point to. Symlinked folders are
//! not followed, so a link back into the tree cannot make the walk loop.

use std::fs::{self, create_dir_all, read_dir};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use fs_extra::file::{CopyOptions, copy};
use log::{debug, trace};

use crate::errors::{Result, file_operation_error, path_operation_error, unsafe_path_error};

use super::{EntryKind, RemoteEntry, RemoteFile, StorageClient};

/// Storage client backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Creates a client rooted at `root`
    ///
    /// # Errors
    /// Returns an error if `root` is not an existing directory
    pub fn new(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(path_operation_error(root.to_path_buf(), "open storage root"));
        }
        Ok(LocalStorage {
            root: root.to_path_buf(),
        })
    }

    fn resolve(&self, id: &str) -> Result<(String, PathBuf)> {
        let segments = normalize_id(id)?;
        let path = segments
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment));
        Ok((segments.join("/"), path))
    }
}

/// Splits an identifier into its path segments
///
/// `.` and empty segments are dropped, so `""`, `"."` and `"/"` all name the
/// root. A segment that climbs out of the tree is rejected.
fn normalize_id(id: &str) -> Result<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in id.split('/') {
        let mut named = false;
        for component in Path::new(segment).components() {
            match component {
                Component::Normal(_) => named = true,
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(path_operation_error(PathBuf::from(id), "find storage folder"));
                }
            }
        }
        if named {
            segments.push(segment);
        }
    }
    Ok(segments)
}

impl StorageClient for LocalStorage {
    fn root_id(&self) -> Result<String> {
        Ok(String::new())
    }

    fn list_folder(&self, folder_id: &str) -> Result<Vec<RemoteEntry>> {
        let (folder_id, folder) = self.resolve(folder_id)?;
        let reader =
            read_dir(&folder).map_err(|e| file_operation_error(e, folder.clone(), "list"))?;

        let mut entries = Vec::new();
        for dir_entry in reader {
            let dir_entry = dir_entry.map_err(|e| file_operation_error(e, folder.clone(), "list"))?;
            let path = dir_entry.path();

            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                debug!("Skipping entry with non-unicode name: {}", path.display());
                continue;
            };

            let is_symlink = dir_entry
                .file_type()
                .map_err(|e| file_operation_error(e, path.clone(), "read type of"))?
                .is_symlink();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if is_symlink => {
                    debug!("Skipping broken symlink {}: {e}", path.display());
                    continue;
                }
                Err(e) => return Err(file_operation_error(e, path, "read metadata of")),
            };
            if is_symlink && metadata.is_dir() {
                debug!("Not following symlinked folder: {}", path.display());
                continue;
            }

            let modified: DateTime<Utc> = metadata
                .modified()
                .map_err(|e| file_operation_error(e, path.clone(), "read modification time of"))?
                .into();

            let kind = if metadata.is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };

            let id = if folder_id.is_empty() {
                name.clone()
            } else {
                format!("{folder_id}/{name}")
            };

            entries.push(RemoteEntry {
                id,
                trashed: name.starts_with('.'),
                name,
                kind,
                modified,
            });
        }

        entries.sort_by(|a, b| b.modified.cmp(&a.modified));
        trace!("Listed {} entries in {}", entries.len(), folder.display());
        Ok(entries)
    }

    fn download(&self, file: &RemoteFile, destination: &Path) -> Result<()> {
        let (_, source) = self.resolve(&file.id)?;

        if let Some(parent) = destination.parent() {
            create_dir_all(parent)
                .map_err(|e| file_operation_error(e, parent.to_path_buf(), "create directory"))?;
        }

        let options = CopyOptions::new().overwrite(true);
        copy(&source, destination, &options).map_err(|e| {
            file_operation_error(std::io::Error::other(e), source.clone(), "download")
        })?;

        debug!(
            "Downloaded {} -> {}",
            source.display(),
            destination.display()
        );
        Ok(())
    }

    fn local_folder_id(&self, path: &Path) -> Option<String> {
        let root = fs::canonicalize(&self.root).ok()?;
        let path = fs::canonicalize(path).ok()?;
        let relative = path.strip_prefix(&root).ok()?;

        let segments = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        Some(segments.join("/"))
    }
}

/// Joins a forward-slash storage path onto a local directory
///
/// Empty and `.` segments are dropped. Any segment that would leave `base`
/// (`..`, a root or a drive prefix) is rejected, as is a path with no segments.
///
/// # Errors
/// Returns `UnsafePath` if the path cannot be placed inside `base`
pub fn local_destination(base: &Path, remote_path: &str) -> Result<PathBuf> {
    let mut destination = base.to_path_buf();
    let mut pushed = false;

    for segment in remote_path.split('/') {
        if segment.is_empty() {
            continue;
        }
        for component in Path::new(segment).components() {
            match component {
                Component::Normal(part) => {
                    destination.push(part);
                    pushed = true;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(unsafe_path_error(remote_path));
                }
            }
        }
    }

    if !pushed {
        return Err(unsafe_path_error(remote_path));
    }
    Ok(destination)
}
