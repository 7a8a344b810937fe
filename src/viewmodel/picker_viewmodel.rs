use std::fs;
use std::path::{Path, PathBuf};

use super::selection::Selectable;

pub const PARENT_LABEL: &str = "..";

/// One row of the folder picker
#[derive(Debug, Clone, PartialEq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_parent: bool,
}

/// ViewModel for choosing the folder to scan
pub struct PickerViewModel {
    current_dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected_index: usize,
    show_hidden: bool,
    error: Option<String>,
}

impl PickerViewModel {
    pub fn new(start_dir: &Path) -> Self {
        let current_dir = fs::canonicalize(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());
        let mut vm = Self {
            current_dir,
            entries: Vec::new(),
            selected_index: 0,
            show_hidden: false,
            error: None,
        };
        vm.refresh();
        vm
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// Why the current folder could not be listed, if it could not
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-read the current folder
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected_index = 0;
        self.error = None;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(PickerEntry {
                name: PARENT_LABEL.to_string(),
                path: parent.to_path_buf(),
                is_parent: true,
            });
        }

        let read = match fs::read_dir(&self.current_dir) {
            Ok(read) => read,
            Err(e) => {
                tracing::debug!(dir = %self.current_dir.display(), error = %e, "cannot list folder");
                self.error = Some(e.to_string());
                return;
            }
        };

        let mut dirs: Vec<PickerEntry> = read
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| PickerEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_parent: false,
            })
            .filter(|entry| self.show_hidden || !entry.name.starts_with('.'))
            .collect();
        dirs.sort_by_key(|e| e.name.to_lowercase());
        self.entries.extend(dirs);
    }

    pub fn selected_entry(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected_index)
    }

    pub fn enter_selected(&mut self) {
        if let Some(path) = self.selected_entry().map(|e| e.path.clone()) {
            self.current_dir = path;
            self.refresh();
        }
    }

    /// Go to the parent folder, returns false at the filesystem root
    pub fn go_up(&mut self) -> bool {
        match self.current_dir.parent().map(Path::to_path_buf) {
            Some(parent) => {
                self.current_dir = parent;
                self.refresh();
                true
            }
            None => false,
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.refresh();
    }
}

impl Selectable for PickerViewModel {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn selected(&self) -> usize {
        self.selected_index
    }

    fn set_selected(&mut self, index: usize) {
        self.selected_index = index;
    }
}
