use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use time::OffsetDateTime;

use crate::config::{step_down, step_up, Settings};
use crate::export::{default_export_path, ExportDocument};
use crate::filter::FilterOptions;
use crate::input::{Intent, PAGE_SIZE};
use crate::scanner::{ScanOutcome, ScanSession, ScanStats, SkippedPath};
use crate::util::format_size;
use super::selection::Selectable;
use super::{PickerViewModel, ScanViewModel, TreeViewModel};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    Picker,
    Scanning,
    Chart,
}

/// Action to take after handling an intent
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Redraw,
    Quit,
}

/// What the last completed scan left behind besides the tree
pub struct LastScan {
    pub root: PathBuf,
    pub skipped: Vec<SkippedPath>,
    pub stats: ScanStats,
    pub finished_at: OffsetDateTime,
}

/// Main application ViewModel coordinating the screens and the scan session
pub struct AppViewModel {
    settings: Settings,
    view_mode: ViewMode,
    pub picker_vm: PickerViewModel,
    pub scan_vm: Option<ScanViewModel>,
    pub tree_vm: Option<TreeViewModel>,
    session: Option<ScanSession>,
    last_scan: Option<LastScan>,
    dialog: Option<String>,
    status: Option<String>,
    export_dir: PathBuf,
}

impl AppViewModel {
    /// Opens the picker, or starts scanning right away when a path was given
    pub fn new(settings: Settings) -> Self {
        let picker_vm = PickerViewModel::new(&settings.start_dir);
        let scan_path = settings.scan_path.clone();
        let mut app = Self {
            settings,
            view_mode: ViewMode::Picker,
            picker_vm,
            scan_vm: None,
            tree_vm: None,
            session: None,
            last_scan: None,
            dialog: None,
            status: None,
            export_dir: PathBuf::from("."),
        };
        if let Some(path) = scan_path {
            app.start_scan(&path);
        }
        app
    }

    /// Folder that `e` writes exports into
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dialog(&self) -> Option<&str> {
        self.dialog.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn last_scan(&self) -> Option<&LastScan> {
        self.last_scan.as_ref()
    }

    pub fn is_scanning(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_at_root(&self) -> bool {
        self.tree_vm.as_ref().is_none_or(|t| t.is_at_root())
    }

    /// Start scanning `path`. Invalid roots end up in the error dialog.
    pub fn start_scan(&mut self, path: &Path) {
        if let Some(previous) = self.session.take() {
            previous.cancel();
        }

        match ScanSession::start(path, self.settings.scan.clone()) {
            Ok(session) => self.begin(session),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot start scan");
                self.dialog = Some(e.to_string());
            }
        }
    }

    /// Show progress for `session`. The previous tree is dropped here.
    fn begin(&mut self, session: ScanSession) {
        tracing::info!(root = %session.root().display(), "scan started");
        self.tree_vm = None;
        self.last_scan = None;
        self.scan_vm = Some(ScanViewModel::new(session.root().to_path_buf()));
        self.session = Some(session);
        self.view_mode = ViewMode::Scanning;
    }

    /// Drain scan progress and collect the result once the worker is done.
    /// Returns true when something changed on screen.
    pub fn poll(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };

        let mut changed = false;
        let finished = session.is_finished();
        if let Some(scan_vm) = self.scan_vm.as_mut() {
            for event in session.events() {
                scan_vm.apply(event);
                changed = true;
            }
        }

        if finished {
            if let Some(session) = self.session.take() {
                self.finish_scan(session);
            }
            changed = true;
        }
        changed
    }

    fn finish_scan(&mut self, session: ScanSession) {
        self.scan_vm = None;
        match session.join() {
            Ok(ScanOutcome::Completed(report)) => {
                tracing::info!(
                    root = %report.root.path.display(),
                    bytes = report.stats.bytes,
                    skipped = report.skipped.len(),
                    "scan finished"
                );
                self.status = Some(format!(
                    "Scanned {} in {:.1}s",
                    format_size(report.stats.bytes),
                    report.stats.elapsed.as_secs_f64()
                ));
                self.last_scan = Some(LastScan {
                    root: report.root.path.clone(),
                    skipped: report.skipped,
                    stats: report.stats,
                    finished_at: OffsetDateTime::now_utc(),
                });
                self.tree_vm = Some(TreeViewModel::new(
                    Arc::new(report.root),
                    self.settings.filter,
                    self.settings.max_slices,
                ));
                self.view_mode = ViewMode::Chart;
            }
            Ok(ScanOutcome::Cancelled) => {
                tracing::info!("scan cancelled");
                self.status = Some("Scan cancelled".to_string());
                self.view_mode = ViewMode::Picker;
            }
            Err(e) => {
                tracing::error!(error = %e, "scan failed");
                self.dialog = Some(e.to_string());
                self.view_mode = ViewMode::Picker;
            }
        }
    }

    fn update_filter(&mut self, filter: FilterOptions) {
        self.settings.filter = filter;
        if let Some(tree_vm) = self.tree_vm.as_mut() {
            tree_vm.set_options(filter);
        }
        self.status = Some(format!(
            "Threshold {}{}",
            format_size(filter.min_size),
            if filter.apply_to_subfolders {
                ", applied to subfolders"
            } else {
                ", top level only"
            }
        ));
    }

    /// Write the top-level result as JSON into `dir`
    pub fn export_current(&self, dir: &Path) -> Result<PathBuf> {
        let (Some(tree_vm), Some(last)) = (&self.tree_vm, &self.last_scan) else {
            bail!("Nothing to export yet");
        };
        let path = default_export_path(dir, last.finished_at);
        ExportDocument::new(
            &last.root,
            last.finished_at,
            &tree_vm.options(),
            tree_vm.result(),
            &last.skipped,
        )
        .write_to(&path)?;
        Ok(path)
    }

    fn move_current(&mut self, intent: Intent) {
        let list: &mut dyn Selectable = match self.view_mode {
            ViewMode::Picker => &mut self.picker_vm,
            ViewMode::Chart => match self.tree_vm.as_mut() {
                Some(tree_vm) => tree_vm,
                None => return,
            },
            ViewMode::Scanning => return,
        };
        match intent {
            Intent::MoveUp => list.move_up(),
            Intent::MoveDown => list.move_down(),
            Intent::PageUp => list.page_up(PAGE_SIZE),
            Intent::PageDown => list.page_down(PAGE_SIZE),
            _ => {}
        }
    }

    /// Handle a user intent and return the action to take
    pub fn handle_intent(&mut self, intent: Intent) -> Action {
        match intent {
            Intent::Quit => {
                if let Some(session) = &self.session {
                    session.cancel();
                }
                return Action::Quit;
            }

            Intent::Dismiss => self.dialog = None,

            Intent::MoveUp | Intent::MoveDown | Intent::PageUp | Intent::PageDown => {
                self.move_current(intent)
            }

            Intent::Enter => match self.view_mode {
                ViewMode::Picker => self.picker_vm.enter_selected(),
                ViewMode::Chart => {
                    if let Some(tree_vm) = self.tree_vm.as_mut() {
                        tree_vm.enter_selected();
                    }
                }
                ViewMode::Scanning => {}
            },

            Intent::Back => match self.view_mode {
                ViewMode::Picker => {
                    self.picker_vm.go_up();
                }
                ViewMode::Chart => {
                    if let Some(tree_vm) = self.tree_vm.as_mut() {
                        tree_vm.go_back();
                    }
                }
                ViewMode::Scanning => {}
            },

            Intent::ScanHere => {
                let dir = self.picker_vm.current_dir().to_path_buf();
                self.start_scan(&dir);
            }

            Intent::ToggleHidden => self.picker_vm.toggle_hidden(),

            Intent::CancelScan => {
                if let Some(session) = &self.session {
                    session.cancel();
                    if let Some(scan_vm) = self.scan_vm.as_mut() {
                        scan_vm.mark_cancelling();
                    }
                }
            }

            Intent::OpenPicker => {
                self.picker_vm.refresh();
                self.view_mode = ViewMode::Picker;
            }

            Intent::ShowChart => {
                if self.tree_vm.is_none() {
                    return Action::Quit;
                }
                self.view_mode = ViewMode::Chart;
            }

            Intent::RaiseThreshold => {
                let mut filter = self.settings.filter;
                filter.min_size = step_up(filter.min_size);
                self.update_filter(filter);
            }

            Intent::LowerThreshold => {
                let mut filter = self.settings.filter;
                filter.min_size = step_down(filter.min_size);
                self.update_filter(filter);
            }

            Intent::ToggleSubfolders => {
                let mut filter = self.settings.filter;
                filter.apply_to_subfolders = !filter.apply_to_subfolders;
                self.update_filter(filter);
            }

            Intent::ToggleSort => {
                if let Some(tree_vm) = self.tree_vm.as_mut() {
                    tree_vm.toggle_sort();
                }
            }

            Intent::Rescan => {
                if let Some(root) = self.last_scan.as_ref().map(|l| l.root.clone()) {
                    self.start_scan(&root);
                }
            }

            Intent::Export => {
                let dir = self.export_dir.clone();
                match self.export_current(&dir) {
                    Ok(path) => self.status = Some(format!("Exported to {}", path.display())),
                    Err(e) => {
                        tracing::warn!(error = %e, "export failed");
                        self.dialog = Some(format!("{e:#}"));
                    }
                }
            }
        }
        Action::Redraw
    }

    /// Get the ViewMode as input::ViewMode for key mapping
    pub fn input_view_mode(&self) -> crate::input::ViewMode {
        if self.dialog.is_some() {
            return crate::input::ViewMode::Dialog;
        }
        match self.view_mode {
            ViewMode::Picker => crate::input::ViewMode::Picker,
            ViewMode::Scanning => crate::input::ViewMode::Scanning,
            ViewMode::Chart => crate::input::ViewMode::Chart,
        }
    }
}
