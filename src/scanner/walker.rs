//! Directory walker.
//!
//! Walks the tree in file-name order so discovery is deterministic, pruning
//! excluded directories before descending into them.

use std::path::Path;

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use super::types::DiscoveredFile;
use crate::analysis::to_project_path;
use crate::config::ScanConfig;

/// Walk `root` and return every file with a scanned extension.
pub fn walk_directory(root: &Path, config: &ScanConfig) -> Vec<DiscoveredFile> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, config))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                // Non-fatal: an unreadable directory only hides its own files.
                warn!(error = %e, "walk error");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| config.is_scanned_file(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| {
            let path = to_project_path(root, entry.path())?;
            Some(DiscoveredFile {
                abs_path: entry.into_path(),
                path,
            })
        })
        .collect()
}

/// Check if a directory should be pruned. The root itself is never pruned.
fn is_excluded_dir(entry: &DirEntry, config: &ScanConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && config.is_excluded_dir(&entry.file_name().to_string_lossy())
}
