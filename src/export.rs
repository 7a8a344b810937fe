//! JSON export of a finished scan

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use time::OffsetDateTime;

use crate::filter::{FilterOptions, FilterResult};
use crate::model::EntryKind;
use crate::scanner::SkippedPath;
use crate::util::{file_stamp, format_timestamp};

#[derive(Debug, Serialize)]
pub struct ExportItem<'a> {
    pub label: &'a str,
    pub path: &'a Path,
    pub kind: EntryKind,
    pub size_bytes: u64,
}

#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub root: &'a Path,
    pub scanned_at: String,
    pub min_size: u64,
    pub apply_to_subfolders: bool,
    pub total: u64,
    pub items: Vec<ExportItem<'a>>,
    pub other: u64,
    pub skipped: Vec<&'a Path>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(
        root: &'a Path,
        scanned_at: OffsetDateTime,
        options: &FilterOptions,
        result: &'a FilterResult,
        skipped: &'a [SkippedPath],
    ) -> Self {
        Self {
            root,
            scanned_at: format_timestamp(scanned_at),
            min_size: options.min_size,
            apply_to_subfolders: options.apply_to_subfolders,
            total: result.total,
            items: result
                .slices
                .iter()
                .map(|s| ExportItem {
                    label: &s.label,
                    path: &s.path,
                    kind: s.kind,
                    size_bytes: s.size_bytes,
                })
                .collect(),
            other: result.other,
            skipped: skipped.iter().map(|s| s.path.as_path()).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize export")
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), items = self.items.len(), "export written");
        Ok(())
    }
}

/// `diskpie-<stamp>.json` in `dir`
pub fn default_export_path(dir: &Path, at: OffsetDateTime) -> PathBuf {
    dir.join(format!("diskpie-{}.json", file_stamp(at)))
}
