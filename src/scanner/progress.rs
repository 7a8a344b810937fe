//! Progress reporting abstraction
//!
//! Decouples the walker from whoever displays progress: an indicatif
//! spinner on the command line, a channel into the TUI, or nothing.

use std::path::Path;
use std::sync::mpsc::Sender;

use indicatif::{ProgressBar, ProgressStyle};

use super::types::{ScanEvent, ScanProgress, ScanStats, SkippedPath};
use crate::util::{format_size, shorten_path};

/// A handle to one running scan's progress display
pub trait ProgressHandle: Send + Sync {
    fn progress(&self, progress: &ScanProgress);
    fn skipped(&self, skipped: &SkippedPath);
    fn finish(&self, stats: &ScanStats);
}

/// Factory for progress handles, one per scan
pub trait ProgressReporter: Send + Sync {
    fn start(&self, root: &Path) -> Box<dyn ProgressHandle>;
}

/// Indicatif spinner for headless runs
pub struct IndicatifProgress;

impl ProgressReporter for IndicatifProgress {
    fn start(&self, root: &Path) -> Box<dyn ProgressHandle> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} Scanning {prefix}: {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_prefix(root.display().to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Box::new(IndicatifHandle(pb))
    }
}

struct IndicatifHandle(ProgressBar);

impl ProgressHandle for IndicatifHandle {
    fn progress(&self, progress: &ScanProgress) {
        self.0.set_message(format!(
            "{} dirs, {} files, {} ...{}",
            progress.dirs_visited,
            progress.files_visited,
            format_size(progress.bytes_seen),
            shorten_path(&progress.current, 40),
        ));
    }

    fn skipped(&self, _skipped: &SkippedPath) {}

    fn finish(&self, _stats: &ScanStats) {
        self.0.finish_and_clear();
    }
}

/// No-op progress reporter for tests, benchmarks and quiet mode
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _root: &Path) -> Box<dyn ProgressHandle> {
        Box::new(NoopHandle)
    }
}

struct NoopHandle;

impl ProgressHandle for NoopHandle {
    fn progress(&self, _progress: &ScanProgress) {}
    fn skipped(&self, _skipped: &SkippedPath) {}
    fn finish(&self, _stats: &ScanStats) {}
}

/// Shows the spinner only when stderr is a terminal
pub struct InteractiveProgress {
    interactive: bool,
}

impl InteractiveProgress {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl ProgressReporter for InteractiveProgress {
    fn start(&self, root: &Path) -> Box<dyn ProgressHandle> {
        if self.interactive {
            IndicatifProgress.start(root)
        } else {
            NoopProgress.start(root)
        }
    }
}

/// Forwards every notification as a `ScanEvent` over a channel.
///
/// Send errors are ignored: a dropped receiver means nobody is watching.
pub struct ChannelProgress {
    tx: Sender<ScanEvent>,
}

impl ChannelProgress {
    pub fn new(tx: Sender<ScanEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressReporter for ChannelProgress {
    fn start(&self, root: &Path) -> Box<dyn ProgressHandle> {
        let tx = self.tx.clone();
        let _ = tx.send(ScanEvent::Started {
            root: root.to_path_buf(),
        });
        Box::new(ChannelHandle { tx })
    }
}

struct ChannelHandle {
    tx: Sender<ScanEvent>,
}

impl ChannelHandle {
    fn send(&self, event: ScanEvent) {
        let _ = self.tx.send(event);
    }
}

impl ProgressHandle for ChannelHandle {
    fn progress(&self, progress: &ScanProgress) {
        self.send(ScanEvent::Progress(progress.clone()));
    }

    fn skipped(&self, skipped: &SkippedPath) {
        self.send(ScanEvent::Skipped(skipped.clone()));
    }

    fn finish(&self, stats: &ScanStats) {
        self.send(ScanEvent::Finished(*stats));
    }
}
