//! Types produced by the per-file analysis phase.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::{is_relative_specifier, ExportSet, ImportEdge};
use crate::classify::{Classification, ZoneDeps};

/// A file discovered by the walker, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute (or root-joined) path on disk.
    pub abs_path: PathBuf,
    /// Forward-slash path relative to the scan root.
    pub path: String,
}

/// A fully analysed source file. The raw text is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub size: u64,
    pub lines: usize,
    pub imports: Vec<ImportEdge>,
    pub exports: ExportSet,
    pub functions: BTreeSet<String>,
    pub classification: Classification,
    pub deps: ZoneDeps,
}

impl SourceFile {
    pub fn has_exports(&self) -> bool {
        !self.exports.is_empty()
    }

    pub fn is_skipped(&self) -> bool {
        self.classification.is_skipped()
    }

    /// Resolved import targets in text order.
    pub fn resolved_targets(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().filter_map(|edge| edge.resolved.as_deref())
    }

    /// Relative imports that did not resolve to a file.
    pub fn unresolved_relative(&self) -> impl Iterator<Item = &ImportEdge> {
        self.imports
            .iter()
            .filter(|edge| edge.resolved.is_none() && is_relative_specifier(&edge.specifier))
    }
}

/// A file that exists but could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadableFile {
    pub path: String,
    pub error: String,
}

/// The outcome of analysing one discovered file.
pub type FileOutcome = Result<SourceFile, UnreadableFile>;
