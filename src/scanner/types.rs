//! Domain types for filesystem scanning
//!
//! These types form the data contract between the walker, progress
//! reporters and the session running the walker on a worker thread.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::model::Entry;

/// Knobs for a single scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Resolve symbolic links instead of skipping them
    pub follow_symlinks: bool,
    /// Minimum time between two progress notifications
    pub progress_interval: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            progress_interval: Duration::from_millis(100),
        }
    }
}

/// Why a path contributed nothing to the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    PermissionDenied,
    /// Listed by the parent but gone (or dangling) by the time we looked
    Vanished,
    Io,
}

impl SkipReason {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => SkipReason::PermissionDenied,
            io::ErrorKind::NotFound => SkipReason::Vanished,
            _ => SkipReason::Io,
        }
    }
}

/// A path the walker could not read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: SkipReason,
    pub message: String,
}

impl SkippedPath {
    pub fn from_io(path: PathBuf, err: &io::Error) -> Self {
        Self {
            path,
            reason: SkipReason::from_io(err),
            message: err.to_string(),
        }
    }
}

/// Counters collected while walking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files: u64,
    pub dirs: u64,
    pub bytes: u64,
    /// Symlinks not followed plus directories already visited through another path
    pub links_skipped: u64,
    pub elapsed: Duration,
}

/// Snapshot sent with periodic progress notifications
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanProgress {
    pub dirs_visited: u64,
    pub files_visited: u64,
    pub bytes_seen: u64,
    pub current: PathBuf,
}

/// Messages relayed from a scan worker to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Started { root: PathBuf },
    Progress(ScanProgress),
    Skipped(SkippedPath),
    Finished(ScanStats),
}

/// Everything a scan produced, possibly partial when cancelled
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub root: Entry,
    pub skipped: Vec<SkippedPath>,
    pub stats: ScanStats,
    pub cancelled: bool,
}

/// How a session ended; cancelled scans hand back nothing
#[derive(Debug)]
pub enum ScanOutcome {
    Completed(ScanReport),
    Cancelled,
}
