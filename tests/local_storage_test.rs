use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use regex::Regex;
use tempfile::tempdir;

use drive_fetch::storage::{
    EntryKind, LocalStorage, RemoteFile, SearchOptions, StorageClient, search_files,
};

// Helper function to create a file with some content
fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    let mut file = File::create(path).expect("Failed to create test file");
    write!(file, "{content}").expect("Failed to write to test file");
}

#[test]
fn test_new_rejects_missing_root() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let result = LocalStorage::new(&temp_dir.path().join("missing"));
    assert!(result.is_err());
}

#[test]
fn test_list_folder_reports_kinds_and_hidden_entries() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_file(&temp_dir.path().join("a.txt"), "a");
    write_file(&temp_dir.path().join(".hidden.txt"), "h");
    fs::create_dir(temp_dir.path().join("sub")).expect("Failed to create sub directory");

    let storage = LocalStorage::new(temp_dir.path()).unwrap();
    let root = storage.root_id().unwrap();
    let mut entries = storage.list_folder(&root).unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let summary: Vec<(&str, EntryKind, bool)> = entries
        .iter()
        .map(|e| (e.name.as_str(), e.kind, e.trashed))
        .collect();
    assert_eq!(
        summary,
        vec![
            (".hidden.txt", EntryKind::File, true),
            ("a.txt", EntryKind::File, false),
            ("sub", EntryKind::Folder, false),
        ]
    );
    assert!(entries.iter().all(|e| e.id == e.name));
}

#[test]
fn test_search_synthesizes_folder_paths() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path();
    write_file(
        &root.join("Zoom Recordings/apr-10-2025-17-27-28-ROOM/audio_transcript.TRANSCRIPT"),
        "transcript",
    );
    write_file(&root.join("Zoom Recordings/apr-10-2025-17-27-28-ROOM/video.mp4"), "video");
    write_file(&root.join(".trash/old.TRANSCRIPT"), "old");

    let storage = LocalStorage::new(root).unwrap();
    let pattern = Regex::new(r"\.TRANSCRIPT$").unwrap();
    let files = search_files(&storage, None, &pattern, &SearchOptions::default()).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(
        files[0].path,
        "Zoom Recordings/apr-10-2025-17-27-28-ROOM/audio_transcript.TRANSCRIPT"
    );
    assert_eq!(files[0].name, "audio_transcript.TRANSCRIPT");
}

#[test]
fn test_search_from_subfolder() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path();
    write_file(&root.join("a/b/c.txt"), "c");
    write_file(&root.join("d.txt"), "d");

    let storage = LocalStorage::new(root).unwrap();
    let pattern = Regex::new(r"\.txt$").unwrap();
    let files = search_files(&storage, Some("a"), &pattern, &SearchOptions::default()).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "b/c.txt");
    assert_eq!(files[0].id, "a/b/c.txt");
}

#[test]
fn test_download_creates_parent_directories() {
    let source_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = tempdir().expect("Failed to create temp directory");
    write_file(&source_dir.path().join("folder/file.txt"), "payload");

    let storage = LocalStorage::new(source_dir.path()).unwrap();
    let file = RemoteFile {
        id: "folder/file.txt".to_string(),
        name: "file.txt".to_string(),
        path: "folder/file.txt".to_string(),
        modified: Utc::now(),
    };
    let destination = output_dir.path().join("deep/nested/renamed.txt");

    storage.download(&file, &destination).unwrap();

    assert_eq!(fs::read_to_string(&destination).unwrap(), "payload");
    assert!(source_dir.path().join("folder/file.txt").exists());
}

#[test]
fn test_download_rejects_escaping_ids() {
    let source_dir = tempdir().expect("Failed to create temp directory");
    let storage = LocalStorage::new(source_dir.path()).unwrap();
    let file = RemoteFile {
        id: "../outside.txt".to_string(),
        name: "outside.txt".to_string(),
        path: "outside.txt".to_string(),
        modified: Utc::now(),
    };

    let result = storage.download(&file, &source_dir.path().join("copy.txt"));
    assert!(result.is_err());
}

#[test]
fn test_dot_and_slash_folder_ids_name_the_root() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_file(&temp_dir.path().join("a/b.txt"), "b");

    let storage = LocalStorage::new(temp_dir.path()).unwrap();
    let pattern = Regex::new(r"\.txt$").unwrap();

    for folder_id in [".", "/", "./"] {
        let files =
            search_files(&storage, Some(folder_id), &pattern, &SearchOptions::default()).unwrap();
        assert_eq!(files.len(), 1, "folder id {folder_id:?}");
        assert_eq!(files[0].path, "a/b.txt");
        assert_eq!(files[0].id, "a/b.txt");
    }
}

#[test]
fn test_folder_id_climbing_out_is_reported_as_lookup_failure() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let storage = LocalStorage::new(temp_dir.path()).unwrap();

    let error = storage.list_folder("../elsewhere").unwrap_err();
    let message = error.to_string();
    assert!(message.contains("find storage folder"), "{message}");
    assert!(!message.contains("output directory"), "{message}");
}

#[test]
fn test_local_folder_id() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::create_dir_all(temp_dir.path().join("out/nested")).unwrap();
    let elsewhere = tempdir().expect("Failed to create temp directory");

    let storage = LocalStorage::new(temp_dir.path()).unwrap();
    assert_eq!(
        storage.local_folder_id(&temp_dir.path().join("out/nested")),
        Some("out/nested".to_string())
    );
    assert_eq!(storage.local_folder_id(temp_dir.path()), Some(String::new()));
    assert_eq!(storage.local_folder_id(elsewhere.path()), None);
    assert_eq!(storage.local_folder_id(&temp_dir.path().join("missing")), None);
}

#[cfg(unix)]
#[test]
fn test_symlinks() {
    use std::os::unix::fs::symlink;

    let temp_dir = tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path();
    write_file(&root.join("real/report.txt"), "report");
    symlink(root.join("real/report.txt"), root.join("linked.txt")).unwrap();
    symlink(root.join("real"), root.join("linked_dir")).unwrap();
    symlink(root.join("missing.txt"), root.join("broken.txt")).unwrap();

    let storage = LocalStorage::new(root).unwrap();
    let mut entries = storage.list_folder("").unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let summary: Vec<(&str, EntryKind)> =
        entries.iter().map(|e| (e.name.as_str(), e.kind)).collect();
    assert_eq!(
        summary,
        vec![("linked.txt", EntryKind::File), ("real", EntryKind::Folder)]
    );

    let output_dir = tempdir().expect("Failed to create temp directory");
    let file = RemoteFile {
        id: "linked.txt".to_string(),
        name: "linked.txt".to_string(),
        path: "linked.txt".to_string(),
        modified: Utc::now(),
    };
    let destination = output_dir.path().join("linked.txt");
    storage.download(&file, &destination).unwrap();
    assert_eq!(fs::read_to_string(&destination).unwrap(), "report");
}
