use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

use crate::chart::PieChart;
use crate::filter::{apply_threshold, FilterOptions, FilterResult};
use crate::model::Entry;
use crate::util::display_trail;

use super::selection::Selectable;

/// View representation of one row in the breakdown list
#[derive(Debug, Clone, PartialEq)]
pub struct SliceView {
    pub name: String,
    pub path: Option<PathBuf>,
    pub size: u64,
    pub is_dir: bool,
    pub has_children: bool,
    /// The residual row for items under the threshold
    pub is_other: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Size,
    Name,
}

struct ChildrenCache {
    children: Vec<SliceView>,
    dirty: bool,
}

/// ViewModel for the chart screen: one filtered level at a time, with drill-down
pub struct TreeViewModel {
    root: Arc<Entry>,
    options: FilterOptions,
    result: FilterResult,
    path_stack: Vec<String>,
    selected_index: usize,
    sort: SortKey,
    max_slices: usize,
    cache: RefCell<ChildrenCache>,
}

impl TreeViewModel {
    pub fn new(root: Arc<Entry>, options: FilterOptions, max_slices: usize) -> Self {
        let result = apply_threshold(&root, &options);
        Self {
            root,
            options,
            result,
            path_stack: Vec::new(),
            selected_index: 0,
            sort: SortKey::Size,
            max_slices,
            cache: RefCell::new(ChildrenCache {
                children: Vec::new(),
                dirty: true,
            }),
        }
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    pub fn options(&self) -> FilterOptions {
        self.options
    }

    /// Top-level result, independent of the drill-down position
    pub fn result(&self) -> &FilterResult {
        &self.result
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn is_at_root(&self) -> bool {
        self.path_stack.is_empty()
    }

    pub fn current_path(&self) -> String {
        display_trail(&self.path_stack)
    }

    /// The level currently shown
    pub fn current_level(&self) -> &FilterResult {
        self.result.level(&self.path_stack).unwrap_or(&self.result)
    }

    fn invalidate(&mut self) {
        self.cache.borrow_mut().dirty = true;
        self.selected_index = 0;
    }

    fn ensure_children(&self) {
        let mut cache = self.cache.borrow_mut();
        if !cache.dirty {
            return;
        }

        let level = self.current_level();
        let mut children: Vec<SliceView> = level
            .slices
            .iter()
            .map(|slice| SliceView {
                name: slice.label.clone(),
                path: Some(slice.path.clone()),
                size: slice.size_bytes,
                is_dir: slice.is_dir(),
                has_children: slice.has_children(),
                is_other: false,
            })
            .collect();

        if self.sort == SortKey::Name {
            children.sort_by_key(|c| c.name.to_lowercase());
        }

        if level.other > 0 {
            children.push(SliceView {
                name: level.other_label().to_string(),
                path: None,
                size: level.other,
                is_dir: false,
                has_children: false,
                is_other: true,
            });
        }

        cache.children = children;
        cache.dirty = false;
    }

    pub fn visible_children(&self) -> std::cell::Ref<'_, Vec<SliceView>> {
        self.ensure_children();
        std::cell::Ref::map(self.cache.borrow(), |c| &c.children)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Total of the level shown, for percentages
    pub fn total_for_percent(&self) -> u64 {
        self.current_level().total
    }

    pub fn pie(&self) -> PieChart {
        PieChart::from_pairs(&self.current_level().pairs(), self.max_slices)
    }

    pub fn selected_item(&self) -> Option<SliceView> {
        self.visible_children().get(self.selected_index).cloned()
    }

    pub fn enter_selected(&mut self) {
        let child_name = self
            .selected_item()
            .filter(|c| c.has_children && !c.is_other)
            .map(|c| c.name);
        if let Some(name) = child_name {
            self.path_stack.push(name);
            self.invalidate();
        }
    }

    /// Go back one level, returns false if already at root
    pub fn go_back(&mut self) -> bool {
        if self.path_stack.pop().is_some() {
            self.invalidate();
            true
        } else {
            false
        }
    }

    pub fn toggle_sort(&mut self) {
        self.sort = match self.sort {
            SortKey::Size => SortKey::Name,
            SortKey::Name => SortKey::Size,
        };
        self.invalidate();
    }

    /// Re-filter with new options, staying as deep as the new result allows
    pub fn set_options(&mut self, options: FilterOptions) {
        if options == self.options {
            return;
        }
        self.options = options;
        self.result = apply_threshold(&self.root, &options);
        while !self.path_stack.is_empty() && self.result.level(&self.path_stack).is_none() {
            self.path_stack.pop();
        }
        self.invalidate();
    }
}

impl Selectable for TreeViewModel {
    fn len(&self) -> usize {
        self.ensure_children();
        self.cache.borrow().children.len()
    }

    fn selected(&self) -> usize {
        self.selected_index
    }

    fn set_selected(&mut self, index: usize) {
        self.selected_index = index;
    }
}
