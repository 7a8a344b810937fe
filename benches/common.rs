// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use diskpie::model::Entry;
use tempfile::TempDir;

/// Generate a tree with N files spread over nested folders
pub fn generate_tree(num_files: usize) -> Entry {
    let mut root = Entry::directory("/bench");
    let dirs = ["src", "lib", "test", "pkg", "mod"];

    for i in 0..num_files {
        let depth = (i % 5) + 1;
        let mut parts: Vec<String> = (0..depth)
            .map(|d| format!("{}_{}", dirs[d], i / 1000))
            .collect();
        parts.push(format!("file_{}.bin", i));

        let refs: Vec<&str> = parts.iter().map(|s| s.as_str()).collect();
        // Skewed sizes so thresholds fold a realistic share into Other
        root.add_file(&refs, ((i % 97) as u64 + 1) * 1024);
    }
    root.compute_totals();
    root
}

/// Lay out `num_files` small files on disk, `per_dir` per folder
pub fn create_bench_dir(num_files: usize, per_dir: usize) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    for i in 0..num_files {
        let folder = root.join(format!("dir_{}", i / per_dir.max(1)));
        fs::create_dir_all(&folder).unwrap();
        let file = fs::File::create(folder.join(format!("file_{}.bin", i))).unwrap();
        file.set_len((i % 13) as u64 * 100).unwrap();
    }
    (dir, root)
}
