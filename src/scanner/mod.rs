//! Filesystem scanner
//!
//! Walks a folder and builds an `Entry` tree of cumulative sizes.
//!
//! # Architecture
//!
//! - **types**: Data contract (options, events, report, skipped paths)
//! - **error**: Fatal errors and root validation
//! - **cancel**: Cooperative cancellation flag
//! - **progress**: Progress reporting abstraction
//! - **walk**: Explicit-stack walker and size aggregation
//! - **session**: Runs a walk on a worker thread for the UI

mod cancel;
mod error;
mod progress;
mod session;
mod types;
mod walk;

pub use cancel::CancelToken;
pub use error::{validate_root, ScanError, ScanResult};
pub use progress::{
    ChannelProgress, IndicatifProgress, InteractiveProgress, NoopProgress, ProgressHandle,
    ProgressReporter,
};
pub use session::ScanSession;
pub use types::{
    ScanEvent, ScanOptions, ScanOutcome, ScanProgress, ScanReport, ScanStats, SkipReason,
    SkippedPath,
};
pub use walk::Scanner;
