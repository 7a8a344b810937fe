use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "diskpie", version, about = "Chart the disk usage of a folder")]
pub struct Cli {
    /// Folder to scan. Without it the folder picker opens at the home directory
    pub path: Option<PathBuf>,

    /// Hide items smaller than this (e.g. 512, 10KB, 6MB, 1.5GB)
    #[arg(short, long, default_value = "0")]
    pub min_size: String,

    /// Apply the minimum size inside subfolders too, not only at the top level
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub subfolders: bool,

    /// Follow symbolic links (directories already seen are skipped)
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// Maximum number of pie slices before the tail is grouped as "Other"
    #[arg(long, default_value_t = crate::chart::DEFAULT_MAX_SLICES)]
    pub max_slices: usize,

    /// Skip the TUI and print the top-level breakdown
    #[arg(long, requires = "path")]
    pub print: bool,

    /// Skip the TUI and print the result as JSON
    #[arg(long, requires = "path", conflicts_with = "print")]
    pub json: bool,

    /// Skip the TUI and write the JSON result to this file
    #[arg(long, value_name = "FILE", requires = "path")]
    pub export: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.print || self.json || self.export.is_some()
    }
}
