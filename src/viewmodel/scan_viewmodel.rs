use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::scanner::{ScanEvent, ScanProgress, ScanStats, SkippedPath};
use crate::util::{format_size, shorten_path};

/// Width of the current-path column on the scan screen
const PATH_WIDTH: usize = 40;

/// ViewModel for the progress screen of a running scan
pub struct ScanViewModel {
    root: PathBuf,
    progress: Option<ScanProgress>,
    skipped: Vec<SkippedPath>,
    stats: Option<ScanStats>,
    started: Instant,
    cancelling: bool,
}

impl ScanViewModel {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            progress: None,
            skipped: Vec::new(),
            stats: None,
            started: Instant::now(),
            cancelling: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn apply(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Started { root } => self.root = root,
            ScanEvent::Progress(progress) => self.progress = Some(progress),
            ScanEvent::Skipped(skipped) => self.skipped.push(skipped),
            ScanEvent::Finished(stats) => self.stats = Some(stats),
        }
    }

    pub fn progress(&self) -> Option<&ScanProgress> {
        self.progress.as_ref()
    }

    pub fn skipped(&self) -> &[SkippedPath] {
        &self.skipped
    }

    pub fn is_done(&self) -> bool {
        self.stats.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.stats
            .map(|s| s.elapsed)
            .unwrap_or_else(|| self.started.elapsed())
    }

    pub fn mark_cancelling(&mut self) {
        self.cancelling = true;
    }

    pub fn is_cancelling(&self) -> bool {
        self.cancelling
    }

    /// Path currently being walked, tail-shortened to fit the screen
    pub fn current_path(&self) -> String {
        let path = self
            .progress
            .as_ref()
            .map(|p| p.current.as_path())
            .unwrap_or(&self.root);
        shorten_path(path, PATH_WIDTH)
    }

    pub fn status_line(&self) -> String {
        if self.cancelling {
            return "Cancelling...".to_string();
        }
        match &self.progress {
            Some(p) => format!(
                "{} dirs, {} files, {} | {} skipped | {:.1}s",
                p.dirs_visited,
                p.files_visited,
                format_size(p.bytes_seen),
                self.skipped.len(),
                self.elapsed().as_secs_f64()
            ),
            None => "Starting...".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::SkipReason;

    #[test]
    fn test_apply_events() {
        let mut vm = ScanViewModel::new(PathBuf::from("/data"));
        assert_eq!(vm.status_line(), "Starting...");

        vm.apply(ScanEvent::Progress(ScanProgress {
            dirs_visited: 3,
            files_visited: 10,
            bytes_seen: 2048,
            current: PathBuf::from("/data/photos"),
        }));
        vm.apply(ScanEvent::Skipped(SkippedPath {
            path: PathBuf::from("/data/locked"),
            reason: SkipReason::PermissionDenied,
            message: "denied".into(),
        }));

        assert_eq!(vm.current_path(), "/data/photos");
        assert_eq!(vm.skipped().len(), 1);
        assert!(vm.status_line().starts_with("3 dirs, 10 files, 2.0 KB | 1 skipped"));
        assert!(!vm.is_done());

        vm.apply(ScanEvent::Finished(ScanStats {
            elapsed: Duration::from_millis(1500),
            ..ScanStats::default()
        }));
        assert!(vm.is_done());
        assert_eq!(vm.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_long_path_is_shortened() {
        let mut vm = ScanViewModel::new(PathBuf::from("/"));
        let deep = format!("/{}", "nested/".repeat(20));
        vm.apply(ScanEvent::Progress(ScanProgress {
            dirs_visited: 1,
            files_visited: 0,
            bytes_seen: 0,
            current: PathBuf::from(deep),
        }));

        assert!(vm.current_path().chars().count() <= PATH_WIDTH);
    }

    #[test]
    fn test_cancelling_status() {
        let mut vm = ScanViewModel::new(PathBuf::from("/data"));
        vm.mark_cancelling();
        assert!(vm.is_cancelling());
        assert_eq!(vm.status_line(), "Cancelling...");
    }
}
