//! Directory walker
//!
//! Walks the tree with an explicit stack into a flat arena, then folds
//! sizes bottom-up and assembles the owned `Entry` tree. Children always
//! sit at higher arena indices than their parent, so a single reverse pass
//! sees every child before its parent.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rustc_hash::FxHashSet;

use super::cancel::CancelToken;
use super::error::{validate_root, ScanResult};
use super::progress::{ProgressHandle, ProgressReporter};
use super::types::{ScanOptions, ScanProgress, ScanReport, ScanStats, SkippedPath};
use crate::model::{display_name, sort_children, Entry, EntryKind};

/// Identity of a directory used to detect revisits through links or mounts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DirKey {
    #[cfg_attr(not(unix), allow(dead_code))]
    Inode { dev: u64, ino: u64 },
    #[cfg_attr(unix, allow(dead_code))]
    Canonical(PathBuf),
}

impl DirKey {
    #[cfg(unix)]
    fn of(_path: &Path, metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        DirKey::Inode {
            dev: metadata.dev(),
            ino: metadata.ino(),
        }
    }

    #[cfg(not(unix))]
    fn of(path: &Path, _metadata: &Metadata) -> Self {
        DirKey::Canonical(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
    }
}

/// Lists one directory; swapped out in tests to simulate unreadable folders
type ReadDirFn = fn(&Path) -> io::Result<fs::ReadDir>;

struct Node {
    path: PathBuf,
    kind: EntryKind,
    size: u64,
    children: Vec<usize>,
}

/// Filesystem scanner producing an `Entry` tree with cumulative sizes
pub struct Scanner {
    options: ScanOptions,
    cancel: CancelToken,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Share a cancellation flag with the caller
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Scan `root`. Fails only when the root itself is missing or not a directory.
    pub fn scan(&self, root: &Path, progress: &dyn ProgressReporter) -> ScanResult<ScanReport> {
        self.scan_with(root, progress, |dir| fs::read_dir(dir))
    }

    fn scan_with(
        &self,
        root: &Path,
        progress: &dyn ProgressReporter,
        read_dir: ReadDirFn,
    ) -> ScanResult<ScanReport> {
        let root = validate_root(root)?;
        let started = Instant::now();
        tracing::info!(root = %root.display(), follow_symlinks = self.options.follow_symlinks, "scan started");

        let handle = progress.start(&root);
        let mut walk = Walk::new(&self.options, handle.as_ref(), read_dir);
        walk.run(&root, &self.cancel);

        let cancelled = walk.cancelled;
        let skipped = std::mem::take(&mut walk.skipped);
        let mut stats = walk.stats;
        let root_entry = assemble(walk.arena);
        stats.elapsed = started.elapsed();
        handle.finish(&stats);

        tracing::info!(
            files = stats.files,
            dirs = stats.dirs,
            bytes = stats.bytes,
            skipped = skipped.len(),
            cancelled,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "scan finished"
        );

        Ok(ScanReport {
            root: root_entry,
            skipped,
            stats,
            cancelled,
        })
    }
}

/// Mutable state of one walk
struct Walk<'a> {
    options: &'a ScanOptions,
    progress: &'a dyn ProgressHandle,
    read_dir: ReadDirFn,
    arena: Vec<Node>,
    visited: FxHashSet<DirKey>,
    skipped: Vec<SkippedPath>,
    stats: ScanStats,
    last_report: Option<Instant>,
    cancelled: bool,
}

impl<'a> Walk<'a> {
    fn new(options: &'a ScanOptions, progress: &'a dyn ProgressHandle, read_dir: ReadDirFn) -> Self {
        Self {
            options,
            progress,
            read_dir,
            arena: Vec::new(),
            visited: FxHashSet::default(),
            skipped: Vec::new(),
            stats: ScanStats::default(),
            last_report: None,
            cancelled: false,
        }
    }

    fn run(&mut self, root: &Path, cancel: &CancelToken) {
        self.arena.push(Node {
            path: root.to_path_buf(),
            kind: EntryKind::Directory,
            size: 0,
            children: Vec::new(),
        });
        if let Ok(metadata) = fs::metadata(root) {
            self.visited.insert(DirKey::of(root, &metadata));
        }

        let mut stack = vec![0usize];
        while let Some(idx) = stack.pop() {
            if cancel.is_cancelled() {
                tracing::info!("scan cancelled with {} directories pending", stack.len() + 1);
                self.cancelled = true;
                break;
            }
            self.expand(idx, &mut stack);
        }
    }

    /// List one directory, pushing subdirectories onto the stack
    fn expand(&mut self, idx: usize, stack: &mut Vec<usize>) {
        let dir_path = self.arena[idx].path.clone();
        self.stats.dirs += 1;
        self.maybe_report(&dir_path);

        let read_dir = match (self.read_dir)(&dir_path) {
            Ok(rd) => rd,
            Err(e) => {
                self.skip(dir_path, &e);
                return;
            }
        };

        for dent in read_dir {
            let dent = match dent {
                Ok(d) => d,
                Err(e) => {
                    self.skip(dir_path.clone(), &e);
                    continue;
                }
            };
            let path = dent.path();

            let file_type = match dent.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    self.skip(path, &e);
                    continue;
                }
            };

            let metadata = if file_type.is_symlink() {
                if !self.options.follow_symlinks {
                    self.stats.links_skipped += 1;
                    continue;
                }
                fs::metadata(&path)
            } else {
                dent.metadata()
            };
            let metadata = match metadata {
                Ok(m) => m,
                Err(e) => {
                    self.skip(path, &e);
                    continue;
                }
            };

            if metadata.is_dir() {
                if !self.visited.insert(DirKey::of(&path, &metadata)) {
                    tracing::debug!(path = %path.display(), "directory already visited");
                    self.stats.links_skipped += 1;
                    continue;
                }
                let child = self.push(idx, path, EntryKind::Directory, 0);
                stack.push(child);
            } else {
                let size = metadata.len();
                self.stats.files += 1;
                self.stats.bytes += size;
                self.push(idx, path, EntryKind::File, size);
            }
        }
    }

    fn push(&mut self, parent: usize, path: PathBuf, kind: EntryKind, size: u64) -> usize {
        let id = self.arena.len();
        self.arena.push(Node {
            path,
            kind,
            size,
            children: Vec::new(),
        });
        self.arena[parent].children.push(id);
        id
    }

    fn skip(&mut self, path: PathBuf, err: &io::Error) {
        tracing::warn!(path = %path.display(), error = %err, "skipping unreadable path");
        let skipped = SkippedPath::from_io(path, err);
        self.progress.skipped(&skipped);
        self.skipped.push(skipped);
    }

    fn maybe_report(&mut self, current: &Path) {
        let now = Instant::now();
        let due = match self.last_report {
            None => true,
            Some(last) => now.duration_since(last) >= self.options.progress_interval,
        };
        if !due {
            return;
        }
        self.last_report = Some(now);
        self.progress.progress(&ScanProgress {
            dirs_visited: self.stats.dirs,
            files_visited: self.stats.files,
            bytes_seen: self.stats.bytes,
            current: current.to_path_buf(),
        });
    }
}

/// Fold sizes bottom-up and turn the arena into an owned tree
fn assemble(arena: Vec<Node>) -> Entry {
    let mut slots: Vec<Option<Entry>> = Vec::with_capacity(arena.len());
    slots.resize_with(arena.len(), || None);

    for (idx, node) in arena.into_iter().enumerate().rev() {
        let mut children: Vec<Entry> = node
            .children
            .iter()
            .filter_map(|&child| slots[child].take())
            .collect();

        let size_bytes = match node.kind {
            EntryKind::File => node.size,
            EntryKind::Directory => children.iter().map(|c| c.size_bytes).sum(),
        };
        sort_children(&mut children);

        slots[idx] = Some(Entry {
            name: display_name(&node.path),
            path: node.path,
            kind: node.kind,
            size_bytes,
            children,
        });
    }

    slots
        .into_iter()
        .next()
        .flatten()
        .unwrap_or_else(|| Entry::directory(PathBuf::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::progress::NoopProgress;
    use crate::scanner::types::SkipReason;

    fn node(path: &str, kind: EntryKind, size: u64, children: Vec<usize>) -> Node {
        Node {
            path: PathBuf::from(path),
            kind,
            size,
            children,
        }
    }

    #[test]
    fn test_assemble_folds_sizes() {
        let arena = vec![
            node("/r", EntryKind::Directory, 0, vec![1, 2]),
            node("/r/a", EntryKind::File, 10, vec![]),
            node("/r/d", EntryKind::Directory, 0, vec![3, 4]),
            node("/r/d/b", EntryKind::File, 5, vec![]),
            node("/r/d/c", EntryKind::File, 1, vec![]),
        ];

        let root = assemble(arena);
        assert_eq!(root.size_bytes, 16);
        assert_eq!(root.children[0].name, "a");
        assert_eq!(root.children[1].size_bytes, 6);
        assert!(root.is_consistent());
    }

    #[test]
    fn test_assemble_sorts_children() {
        let arena = vec![
            node("/r", EntryKind::Directory, 0, vec![1, 2, 3]),
            node("/r/small", EntryKind::File, 1, vec![]),
            node("/r/big", EntryKind::File, 100, vec![]),
            node("/r/mid", EntryKind::File, 50, vec![]),
        ];

        let root = assemble(arena);
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["big", "mid", "small"]);
    }

    fn deny_locked(dir: &Path) -> io::Result<fs::ReadDir> {
        if dir.file_name().is_some_and(|n| n == "locked") {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        fs::read_dir(dir)
    }

    fn write(root: &Path, relative: &str, size: u64) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::File::create(&path).unwrap().set_len(size).unwrap();
    }

    #[test]
    fn test_unreadable_folder_keeps_rest_of_tree() {
        let dir = tempfile::TempDir::new().unwrap();
        write(dir.path(), "media/movie.bin", 4000);
        write(dir.path(), "notes.txt", 500);
        write(dir.path(), "locked/secret.bin", 1000);
        write(dir.path(), "locked/inner/deep.bin", 300);

        let report = Scanner::new(ScanOptions::default())
            .scan_with(dir.path(), &NoopProgress, deny_locked)
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("locked"));
        assert_eq!(report.skipped[0].reason, SkipReason::PermissionDenied);

        assert_eq!(report.root.size_bytes, 4500);
        assert_eq!(report.root.find(&["media"]).unwrap().size_bytes, 4000);
        let locked = report.root.find(&["locked"]).unwrap();
        assert_eq!(locked.size_bytes, 0);
        assert!(locked.children.is_empty());
        assert!(report.root.is_consistent());
        assert!(!report.cancelled);
    }

    #[test]
    fn test_assemble_empty_arena() {
        let root = assemble(Vec::new());
        assert!(root.is_dir());
        assert_eq!(root.size_bytes, 0);
    }
}
