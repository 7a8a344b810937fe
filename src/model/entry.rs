use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Whether an entry is a regular file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A node in the scanned filesystem tree carrying a cumulative size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// For files the byte length, for directories the sum over all descendants
    pub size_bytes: u64,
    /// Sorted by size descending, then by name
    pub children: Vec<Entry>,
}

impl Entry {
    pub fn file(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            kind: EntryKind::File,
            size_bytes,
            children: Vec::new(),
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            kind: EntryKind::Directory,
            size_bytes: 0,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Insert a file below this directory, creating intermediate directories.
    /// Sizes are only stored on the file; call `compute_totals` afterwards.
    pub fn add_file(&mut self, components: &[&str], size_bytes: u64) {
        let Some((first, rest)) = components.split_first() else {
            return;
        };

        let pos = match self.children.iter().position(|c| c.name == *first) {
            Some(pos) => pos,
            None => {
                let path = self.path.join(first);
                let child = if rest.is_empty() {
                    Entry::file(path, 0)
                } else {
                    Entry::directory(path)
                };
                self.children.push(child);
                self.children.len() - 1
            }
        };

        let child = &mut self.children[pos];
        if rest.is_empty() {
            child.size_bytes += size_bytes;
        } else {
            child.kind = EntryKind::Directory;
            child.add_file(rest, size_bytes);
        }
    }

    /// Roll file sizes up into directories and restore child ordering
    pub fn compute_totals(&mut self) {
        if !self.is_dir() {
            return;
        }
        let mut total = 0u64;
        for child in &mut self.children {
            child.compute_totals();
            total += child.size_bytes;
        }
        self.size_bytes = total;
        sort_children(&mut self.children);
    }

    /// Check that every directory's size equals the sum of its children
    pub fn is_consistent(&self) -> bool {
        let mut stack = vec![self];
        while let Some(entry) = stack.pop() {
            if entry.is_dir() {
                let sum: u64 = entry.children.iter().map(|c| c.size_bytes).sum();
                if sum != entry.size_bytes {
                    return false;
                }
                stack.extend(entry.children.iter());
            } else if !entry.children.is_empty() {
                return false;
            }
        }
        true
    }

    /// Look up a descendant by the names along its relative path
    pub fn find(&self, components: &[impl AsRef<str>]) -> Option<&Entry> {
        let mut node = self;
        for name in components {
            node = node.children.iter().find(|c| c.name == name.as_ref())?;
        }
        Some(node)
    }

    pub fn file_count(&self) -> u64 {
        self.count_where(|e| !e.is_dir())
    }

    /// Number of directories below this entry, not counting itself
    pub fn dir_count(&self) -> u64 {
        self.count_where(|e| e.is_dir()) - u64::from(self.is_dir())
    }

    fn count_where(&self, pred: impl Fn(&Entry) -> bool) -> u64 {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(entry) = stack.pop() {
            if pred(entry) {
                count += 1;
            }
            stack.extend(entry.children.iter());
        }
        count
    }
}

/// Ordering used everywhere children are listed: largest first, then by name
pub fn size_then_name(a: &Entry, b: &Entry) -> Ordering {
    b.size_bytes
        .cmp(&a.size_bytes)
        .then_with(|| a.name.cmp(&b.name))
}

pub fn sort_children(children: &mut [Entry]) {
    children.sort_by(size_then_name);
}

/// Final path component, or the whole path for roots like `/`
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
