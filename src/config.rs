//! Runtime settings assembled from the command line

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::filter::FilterOptions;
use crate::scanner::ScanOptions;
use crate::util::parse_size;

/// Threshold presets the TUI steps through with `+` and `-`
pub const THRESHOLD_STEPS: [u64; 9] = [
    0,
    1024,
    10 * 1024,
    100 * 1024,
    1024 * 1024,
    10 * 1024 * 1024,
    100 * 1024 * 1024,
    1024 * 1024 * 1024,
    10 * 1024 * 1024 * 1024,
];

#[derive(Debug, Clone)]
pub struct Settings {
    pub scan: ScanOptions,
    pub filter: FilterOptions,
    pub max_slices: usize,
    /// Folder to scan right away, if one was given
    pub scan_path: Option<PathBuf>,
    /// Where the folder picker opens
    pub start_dir: PathBuf,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let min_size = parse_size(&cli.min_size)
            .with_context(|| format!("Invalid --min-size value: {}", cli.min_size))?;

        let start_dir = match &cli.path {
            Some(path) => path.clone(),
            None => dirs::home_dir()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        Ok(Self {
            scan: ScanOptions {
                follow_symlinks: cli.follow_links,
                ..ScanOptions::default()
            },
            filter: FilterOptions {
                min_size,
                apply_to_subfolders: cli.subfolders,
            },
            max_slices: cli.max_slices.max(1),
            scan_path: cli.path.clone(),
            start_dir,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            filter: FilterOptions::default(),
            max_slices: crate::chart::DEFAULT_MAX_SLICES,
            scan_path: None,
            start_dir: PathBuf::from("."),
        }
    }
}

/// Next preset strictly above `current`, saturating at the largest
pub fn step_up(current: u64) -> u64 {
    THRESHOLD_STEPS
        .iter()
        .copied()
        .find(|&s| s > current)
        .unwrap_or(THRESHOLD_STEPS[THRESHOLD_STEPS.len() - 1])
}

/// Next preset strictly below `current`, saturating at zero
pub fn step_down(current: u64) -> u64 {
    THRESHOLD_STEPS
        .iter()
        .rev()
        .copied()
        .find(|&s| s < current)
        .unwrap_or(0)
}
