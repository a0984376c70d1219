//! Static migration guidance attached to every report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const KEEP: &[(&str, &str)] = &[
    (
        "echo_system",
        "All files in src/echo/* - this is your user-facing memory",
    ),
    (
        "qlib_backend",
        "All files in backend/qlib/* - this is your vault interface",
    ),
    ("bridge_files", "Files that connect ECHO and QLIB"),
    ("main_process", "main/* files - core Electron process"),
];

const MIGRATE: &[(&str, &str)] = &[
    (
        "components_memory",
        "Move memory logic from components/* to appropriate ECHO/QLIB locations",
    ),
    (
        "duplicate_functions",
        "Consolidate duplicate implementations between old and new systems",
    ),
];

const DELETE: &[(&str, &str)] = &[
    ("components_backup", "All files in components-backup/*"),
    ("z_archive", "All files in z__archive/*"),
    ("orphaned_files", "Files with no imports and no exports"),
    (
        "old_diagnostics",
        "Old diagnostic and test files from previous attempts",
    ),
];

/// Categorical keep / migrate / delete guidance. Not computed from data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub keep: BTreeMap<String, String>,
    pub migrate: BTreeMap<String, String>,
    pub delete: BTreeMap<String, String>,
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for MigrationPlan {
    fn default() -> Self {
        Self {
            keep: table(KEEP),
            migrate: table(MIGRATE),
            delete: table(DELETE),
        }
    }
}
