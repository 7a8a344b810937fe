use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use super::cancel::CancelToken;
use super::error::{validate_root, ScanError, ScanResult};
use super::progress::ChannelProgress;
use super::types::{ScanEvent, ScanOptions, ScanOutcome, ScanReport};
use super::walk::Scanner;

/// One scan running on a worker thread.
///
/// Created when the user starts a scan and consumed by `join` once the
/// worker is done. Progress arrives through `events`; `cancel` asks the
/// worker to stop at the next directory boundary.
pub struct ScanSession {
    root: PathBuf,
    cancel: CancelToken,
    events: Receiver<ScanEvent>,
    worker: JoinHandle<ScanResult<ScanReport>>,
}

impl ScanSession {
    /// Validate `root` and start scanning it in the background.
    /// A missing or non-directory root fails here and no worker is spawned.
    pub fn start(root: &Path, options: ScanOptions) -> ScanResult<Self> {
        Self::start_with(root, options, CancelToken::new())
    }

    /// Like `start`, sharing `cancel` with the caller
    pub fn start_with(root: &Path, options: ScanOptions, cancel: CancelToken) -> ScanResult<Self> {
        let root = validate_root(root)?;
        let (tx, rx) = mpsc::channel();

        let worker_root = root.clone();
        let worker_cancel = cancel.clone();
        let worker = thread::Builder::new()
            .name("diskpie-scan".into())
            .spawn(move || {
                let progress = ChannelProgress::new(tx);
                Scanner::new(options)
                    .with_cancel(worker_cancel)
                    .scan(&worker_root, &progress)
            })
            .map_err(|source| ScanError::Io {
                path: root.clone(),
                source,
            })?;

        Ok(Self {
            root,
            cancel,
            events: rx,
            worker,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Drain pending progress events without blocking
    pub fn events(&self) -> impl Iterator<Item = ScanEvent> + '_ {
        self.events.try_iter()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker. Partial trees from cancelled scans are dropped here.
    pub fn join(self) -> ScanResult<ScanOutcome> {
        let report = self.worker.join().map_err(|_| ScanError::WorkerPanicked)??;
        if report.cancelled {
            Ok(ScanOutcome::Cancelled)
        } else {
            Ok(ScanOutcome::Completed(report))
        }
    }
}
