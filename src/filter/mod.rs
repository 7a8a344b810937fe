//! Threshold filter
//!
//! Reduces an `Entry` tree to the slices worth drawing. A child smaller
//! than the threshold is folded into the `other` residual of the level it
//! was excluded from, so every level satisfies
//! `sum(slices) + other == total`.
//!
//! With `apply_to_subfolders` off only the top level is thresholded and the
//! breakdowns below it list every child. With it on, every breakdown is
//! thresholded the same way.

use std::path::PathBuf;

use serde::Serialize;

use crate::model::{Entry, EntryKind};

pub const OTHER_LABEL: &str = "Other";
/// Residual label used when a real item at the same level is named "Other"
pub const OTHER_ALT_LABEL: &str = "Other (small items)";

/// Label for a residual shown next to `labels`
pub fn residual_label<'a>(mut labels: impl Iterator<Item = &'a str>) -> &'static str {
    if labels.any(|label| label == OTHER_LABEL) {
        OTHER_ALT_LABEL
    } else {
        OTHER_LABEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    /// Children smaller than this many bytes are folded into `other`
    pub min_size: u64,
    pub apply_to_subfolders: bool,
}

/// One kept item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub label: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size_bytes: u64,
    /// Reduced children of a directory; `None` for files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<FilterResult>,
}

impl Slice {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// A directory with something to drill into
    pub fn has_children(&self) -> bool {
        self.breakdown.as_ref().is_some_and(|b| !b.is_empty() || b.other > 0)
    }
}

/// Reduced view of one directory level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterResult {
    pub total: u64,
    pub slices: Vec<Slice>,
    /// Residual of everything below the threshold at this level
    pub other: u64,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// (label, size) pairs for the chart, with the residual last when non-zero
    pub fn pairs(&self) -> Vec<(&str, u64)> {
        let mut pairs: Vec<(&str, u64)> = self
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.size_bytes))
            .collect();
        if self.other > 0 {
            pairs.push((self.other_label(), self.other));
        }
        pairs
    }

    /// Name of this level's residual, never equal to a kept slice's label
    pub fn other_label(&self) -> &'static str {
        residual_label(self.slices.iter().map(|s| s.label.as_str()))
    }

    pub fn displayed_total(&self) -> u64 {
        self.slices.iter().map(|s| s.size_bytes).sum::<u64>() + self.other
    }

    /// Check size conservation on this level and every breakdown below it
    pub fn is_conserved(&self) -> bool {
        let mut stack = vec![self];
        while let Some(level) = stack.pop() {
            if level.displayed_total() != level.total {
                return false;
            }
            stack.extend(level.slices.iter().filter_map(|s| s.breakdown.as_ref()));
        }
        true
    }

    /// Walk down through slice labels to a nested breakdown
    pub fn level(&self, labels: &[impl AsRef<str>]) -> Option<&FilterResult> {
        let mut level = self;
        for label in labels {
            level = level
                .slices
                .iter()
                .find(|s| s.label == label.as_ref())?
                .breakdown
                .as_ref()?;
        }
        Some(level)
    }
}

/// Reduce `entry`'s children to slices according to `options`
pub fn apply_threshold(entry: &Entry, options: &FilterOptions) -> FilterResult {
    reduce(entry, options.min_size, options.apply_to_subfolders)
}

fn reduce(entry: &Entry, min_size: u64, recursive: bool) -> FilterResult {
    let nested_min = if recursive { min_size } else { 0 };
    let mut slices = Vec::new();
    let mut other = 0u64;

    for child in &entry.children {
        if child.size_bytes < min_size {
            other += child.size_bytes;
            continue;
        }
        let breakdown = child
            .is_dir()
            .then(|| reduce(child, nested_min, recursive));
        slices.push(Slice {
            label: child.name.clone(),
            path: child.path.clone(),
            kind: child.kind,
            size_bytes: child.size_bytes,
            breakdown,
        });
    }

    FilterResult {
        total: entry.size_bytes,
        slices,
        other,
    }
}
