//! Report data structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::migration::MigrationPlan;
use crate::analysis::ImportEdge;
use crate::classify::{BridgeKind, Zone};
use crate::scanner::{SourceFile, UnreadableFile};

/// Per-file record stored in the durable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub size: u64,
    pub lines: usize,
    pub import_count: usize,
    pub export_count: usize,
    pub imports: Vec<ImportEdge>,
    pub exports: Vec<String>,
    pub functions: Vec<String>,
    /// Files with a resolved import of this one, sorted.
    #[serde(default)]
    pub imported_by: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub bridge_kind: Option<BridgeKind>,
}

impl FileRecord {
    pub fn new(file: &SourceFile, imported_by: Vec<String>) -> Self {
        Self {
            path: file.path.clone(),
            size: file.size,
            lines: file.lines,
            import_count: file.imports.len(),
            export_count: file.exports.len(),
            imports: file.imports.clone(),
            exports: file.exports.to_list(),
            functions: file.functions.iter().cloned().collect(),
            imported_by,
            bridge_kind: file.classification.bridge_kind(),
        }
    }
}

/// The files of one zone, grouped by category then path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneBucket {
    pub categories: BTreeMap<String, BTreeMap<String, FileRecord>>,
}

impl ZoneBucket {
    pub fn insert(&mut self, category: &str, record: FileRecord) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(record.path.clone(), record);
    }

    /// Total files across all categories.
    pub fn count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// All paths, category by category.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.categories
            .values()
            .flat_map(|files| files.keys().map(String::as_str))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.categories.values().any(|files| files.contains_key(path))
    }

    /// Up to `limit` paths of one category, for human summaries.
    pub fn preview(&self, category: &str, limit: usize) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|files| files.keys().take(limit).map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// A bridge file and why it is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeEntry {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: BridgeKind,
}

/// A bridge file with resolved dependencies on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationPoint {
    pub file: String,
    pub echo_deps: usize,
    pub qlib_deps: usize,
}

/// A relative import that matched no file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedImport {
    pub file: String,
    pub specifier: String,
}

/// Headline counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureSummary {
    pub files_scanned: usize,
    pub echo_files: usize,
    pub qlib_files: usize,
    pub bridge_files: usize,
    pub legacy_files: usize,
    pub unclassified_files: usize,
    pub skipped_files: usize,
    pub unreadable_files: usize,
    pub truly_dead_files: usize,
    pub resolved_imports: usize,
    pub unresolved_imports: usize,
}

/// The terminal artifact of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// Local time the report was built, `YYYYmmdd_HHMMSS`.
    pub scan_timestamp: String,
    pub project_root: String,
    pub architecture_summary: ArchitectureSummary,
    pub echo_system: ZoneBucket,
    pub qlib_system: ZoneBucket,
    pub bridge_files: ZoneBucket,
    pub legacy_files: ZoneBucket,
    pub unclassified_files: ZoneBucket,
    pub bridges: Vec<BridgeEntry>,
    pub integration_points: Vec<IntegrationPoint>,
    pub truly_dead_files: Vec<String>,
    pub skipped_files: Vec<String>,
    pub unreadable_files: Vec<UnreadableFile>,
    pub unresolved_imports: Vec<UnresolvedImport>,
    pub import_cycles: Vec<Vec<String>>,
    pub migration_recommendations: MigrationPlan,
}

impl DiagnosticReport {
    pub fn bucket(&self, zone: Zone) -> &ZoneBucket {
        match zone {
            Zone::Echo => &self.echo_system,
            Zone::Qlib => &self.qlib_system,
            Zone::Bridge => &self.bridge_files,
            Zone::Legacy => &self.legacy_files,
            Zone::Unclassified => &self.unclassified_files,
        }
    }

    pub(crate) fn bucket_mut(&mut self, zone: Zone) -> &mut ZoneBucket {
        match zone {
            Zone::Echo => &mut self.echo_system,
            Zone::Qlib => &mut self.qlib_system,
            Zone::Bridge => &mut self.bridge_files,
            Zone::Legacy => &mut self.legacy_files,
            Zone::Unclassified => &mut self.unclassified_files,
        }
    }

    /// The zone a path was placed in, if any.
    pub fn zone_of(&self, path: &str) -> Option<Zone> {
        Zone::ALL
            .into_iter()
            .find(|zone| self.bucket(*zone).contains(path))
    }

    pub fn zone_count(&self, zone: Zone) -> usize {
        self.bucket(zone).count()
    }

    /// Up to `limit` paths of a zone, category by category.
    pub fn preview(&self, zone: Zone, limit: usize) -> Vec<&str> {
        self.bucket(zone).paths().take(limit).collect()
    }

    pub fn is_dead(&self, path: &str) -> bool {
        self.truly_dead_files.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }
}
