// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use diskpie::model::Entry;
use tempfile::TempDir;

pub const MB: u64 = 1024 * 1024;

/// Create an empty temporary folder to scan
pub fn create_test_dir() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = fs::canonicalize(dir.path()).unwrap();
    (dir, path)
}

/// Write a file of exactly `size` bytes, creating parent folders
pub fn write_file(root: &Path, relative: &str, size: u64) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = fs::File::create(&path).unwrap();
    file.set_len(size).unwrap();
    path
}

/// A small project-like layout, 7000 bytes in total:
///
/// ```text
/// media/movie.bin   4000
/// media/thumb.png    500
/// src/main.rs       1200
/// src/util/mod.rs    800
/// notes.txt          500
/// empty/
/// ```
pub fn create_sample_tree() -> (TempDir, PathBuf) {
    let (dir, root) = create_test_dir();
    write_file(&root, "media/movie.bin", 4000);
    write_file(&root, "media/thumb.png", 500);
    write_file(&root, "src/main.rs", 1200);
    write_file(&root, "src/util/mod.rs", 800);
    write_file(&root, "notes.txt", 500);
    fs::create_dir(root.join("empty")).unwrap();
    (dir, root)
}

/// The A=10MB, D={B=5MB, C=1MB} layout on disk
pub fn create_scenario_tree() -> (TempDir, PathBuf) {
    let (dir, root) = create_test_dir();
    write_file(&root, "A", 10 * MB);
    write_file(&root, "D/B", 5 * MB);
    write_file(&root, "D/C", MB);
    (dir, root)
}

/// Same shape as an in-memory Entry, for tests that do not touch the disk
pub fn create_entry_tree() -> Entry {
    let mut root = Entry::directory("/data");
    root.add_file(&["media", "movie.bin"], 4000);
    root.add_file(&["media", "thumb.png"], 500);
    root.add_file(&["src", "main.rs"], 1200);
    root.add_file(&["src", "util", "mod.rs"], 800);
    root.add_file(&["notes.txt"], 500);
    root.compute_totals();
    root
}

/// Names of an entry's children in order
pub fn child_names(entry: &Entry) -> Vec<&str> {
    entry.children.iter().map(|c| c.name.as_str()).collect()
}
