//! Storage module
//!
//! This module contains the storage client abstraction, the local directory
//! backend and the recursive search that produces candidate paths.

mod local;
mod search;

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::errors::Result;

pub use local::{LocalStorage, local_destination};
pub use search::{SearchOptions, search_files};

/// Kind of an entry returned when listing a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// A single child of a storage folder
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEntry {
    /// Identifier understood by the storage client
    pub id: String,
    /// Display name of the entry
    pub name: String,
    pub kind: EntryKind,
    /// Last modification time
    pub modified: DateTime<Utc>,
    /// Whether the entry is in the trash and should be ignored
    pub trashed: bool,
}

/// A file that matched a search
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    /// Forward-slash path built from the folder names below the search start
    pub path: String,
    pub modified: DateTime<Utc>,
}

/// Client for a hierarchical file store
///
/// Implementations list folder contents and download single files. Paths and
/// traversal are handled by [`search_files`], so a backend only needs to know
/// about identifiers.
pub trait StorageClient {
    /// Identifier of the folder searched when no folder is given
    fn root_id(&self) -> Result<String>;

    /// Lists the direct children of a folder
    fn list_folder(&self, folder_id: &str) -> Result<Vec<RemoteEntry>>;

    /// Downloads a file to `destination`, creating parent directories as needed
    fn download(&self, file: &RemoteFile, destination: &Path) -> Result<()>;

    /// Identifier of the folder found at `path` on the local filesystem
    ///
    /// Returns `None` unless the storage itself holds that directory, which is
    /// always the case for remote backends.
    fn local_folder_id(&self, _path: &Path) -> Option<String> {
        None
    }
}
