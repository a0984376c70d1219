//! Diagnostic report assembly.
//!
//! [`ReportBuilder`] is a pure aggregation over a finished [`ScanOutput`]:
//! it buckets files by zone and category, lists bridges and integration
//! points, and attaches the dead-file list and the migration template.

mod migration;
mod types;

pub use migration::MigrationPlan;
pub use types::{
    ArchitectureSummary, BridgeEntry, DiagnosticReport, FileRecord, IntegrationPoint,
    UnresolvedImport, ZoneBucket,
};

use chrono::{DateTime, Local};

use crate::classify::{Classification, Zone};
use crate::scanner::ScanOutput;

/// Timestamp format shared by the report and the artifact file name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Builds a [`DiagnosticReport`] from scan results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the report, stamped with `generated_at`.
    pub fn build(&self, output: &ScanOutput, generated_at: DateTime<Local>) -> DiagnosticReport {
        let mut report = DiagnosticReport {
            scan_timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            project_root: output.root.display().to_string(),
            architecture_summary: ArchitectureSummary::default(),
            echo_system: ZoneBucket::default(),
            qlib_system: ZoneBucket::default(),
            bridge_files: ZoneBucket::default(),
            legacy_files: ZoneBucket::default(),
            unclassified_files: ZoneBucket::default(),
            bridges: Vec::new(),
            integration_points: Vec::new(),
            truly_dead_files: output.dead.clone(),
            skipped_files: Vec::new(),
            unreadable_files: output.unreadable.clone(),
            unresolved_imports: Vec::new(),
            import_cycles: output.graph.detect_cycles(),
            migration_recommendations: MigrationPlan::default(),
        };

        let mut resolved_imports = 0;
        for file in &output.files {
            resolved_imports += file.resolved_targets().count();
            report
                .unresolved_imports
                .extend(file.unresolved_relative().map(|edge| UnresolvedImport {
                    file: file.path.clone(),
                    specifier: edge.specifier.clone(),
                }));

            match &file.classification {
                Classification::Skipped { .. } => report.skipped_files.push(file.path.clone()),
                Classification::Zoned { zone, category } => {
                    let importers = output
                        .graph
                        .importers(&file.path)
                        .into_iter()
                        .map(String::from)
                        .collect();
                    report
                        .bucket_mut(*zone)
                        .insert(category, FileRecord::new(file, importers));

                    if let Some(kind) = file.classification.bridge_kind() {
                        report.bridges.push(BridgeEntry {
                            file: file.path.clone(),
                            kind,
                        });
                        if file.deps.spans_both() {
                            report.integration_points.push(IntegrationPoint {
                                file: file.path.clone(),
                                echo_deps: file.deps.echo,
                                qlib_deps: file.deps.qlib,
                            });
                        }
                    }
                }
            }
        }

        report.bridges.sort_by(|a, b| a.file.cmp(&b.file));
        report.integration_points.sort_by(|a, b| a.file.cmp(&b.file));
        report.skipped_files.sort();
        report.unreadable_files.sort_by(|a, b| a.path.cmp(&b.path));
        report
            .unresolved_imports
            .sort_by(|a, b| a.file.cmp(&b.file));

        report.architecture_summary = ArchitectureSummary {
            files_scanned: output.files_scanned(),
            echo_files: report.zone_count(Zone::Echo),
            qlib_files: report.zone_count(Zone::Qlib),
            bridge_files: report.zone_count(Zone::Bridge),
            legacy_files: report.zone_count(Zone::Legacy),
            unclassified_files: report.zone_count(Zone::Unclassified),
            skipped_files: report.skipped_files.len(),
            unreadable_files: report.unreadable_files.len(),
            truly_dead_files: report.truly_dead_files.len(),
            resolved_imports,
            unresolved_imports: report.unresolved_imports.len(),
        };

        report
    }
}
