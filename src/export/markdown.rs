//! Markdown export implementation.
//!
//! Renders the console summary of a scan. Lists are bounded by
//! [`PreviewLimits`]; the JSON artifact carries the full data.

use super::{Exporter, PreviewLimits};
use crate::classify::Zone;
use crate::report::{DiagnosticReport, ZoneBucket};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter {
    limits: PreviewLimits,
}

impl MarkdownExporter {
    pub fn new(limits: PreviewLimits) -> Self {
        Self { limits }
    }

    fn write_bucket<W: Write>(&self, writer: &mut W, zone: Zone, bucket: &ZoneBucket) -> io::Result<()> {
        writeln!(writer, "### {} ({})", zone.title(), bucket.count())?;
        writeln!(writer)?;

        if bucket.is_empty() {
            writeln!(writer, "_None found._")?;
            writeln!(writer)?;
            return Ok(());
        }

        for (category, files) in &bucket.categories {
            writeln!(writer, "- **{}**: {} files", category, files.len())?;
            for path in bucket.preview(category, self.limits.per_category) {
                writeln!(writer, "  - `{}`", path)?;
            }
            if files.len() > self.limits.per_category {
                writeln!(
                    writer,
                    "  - ... and {} more",
                    files.len() - self.limits.per_category
                )?;
            }
        }
        writeln!(writer)
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new(PreviewLimits::default())
    }
}

/// Write "... and N more" when a list was truncated.
fn write_remainder<W: Write>(writer: &mut W, total: usize, shown: usize) -> io::Result<()> {
    if total > shown {
        writeln!(writer, "- ... and {} more", total - shown)?;
    }
    Ok(())
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, report: &DiagnosticReport, writer: &mut W) -> io::Result<()> {
        let summary = &report.architecture_summary;

        writeln!(writer, "# Dual Architecture Scan")?;
        writeln!(writer)?;
        writeln!(writer, "**Project:** `{}`", report.project_root)?;
        writeln!(writer, "**Scanned:** {}", report.scan_timestamp)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Files Scanned | {} |", summary.files_scanned)?;
        writeln!(writer, "| ECHO Files | {} |", summary.echo_files)?;
        writeln!(writer, "| QLIB Files | {} |", summary.qlib_files)?;
        writeln!(writer, "| Bridge Files | {} |", summary.bridge_files)?;
        writeln!(writer, "| Legacy Files | {} |", summary.legacy_files)?;
        writeln!(writer, "| Unclassified Files | {} |", summary.unclassified_files)?;
        writeln!(writer, "| Skipped Files | {} |", summary.skipped_files)?;
        writeln!(writer, "| Unreadable Files | {} |", summary.unreadable_files)?;
        writeln!(writer, "| Truly Dead Files | {} |", summary.truly_dead_files)?;
        writeln!(writer, "| Resolved Imports | {} |", summary.resolved_imports)?;
        writeln!(writer, "| Unresolved Imports | {} |", summary.unresolved_imports)?;
        writeln!(writer)?;

        writeln!(writer, "## Zones")?;
        writeln!(writer)?;
        for zone in Zone::ALL {
            self.write_bucket(writer, zone, report.bucket(zone))?;
        }

        if !report.bridges.is_empty() {
            writeln!(writer, "## Bridges")?;
            writeln!(writer)?;
            for bridge in report.bridges.iter().take(self.limits.bridges) {
                writeln!(writer, "- `{}` ({})", bridge.file, bridge.kind)?;
            }
            write_remainder(writer, report.bridges.len(), self.limits.bridges)?;
            writeln!(writer)?;
        }

        if !report.integration_points.is_empty() {
            writeln!(writer, "## Integration Points")?;
            writeln!(writer)?;
            writeln!(writer, "| File | ECHO Deps | QLIB Deps |")?;
            writeln!(writer, "|------|-----------|-----------|")?;
            for point in report
                .integration_points
                .iter()
                .take(self.limits.integration_points)
            {
                writeln!(
                    writer,
                    "| `{}` | {} | {} |",
                    point.file, point.echo_deps, point.qlib_deps
                )?;
            }
            write_remainder(
                writer,
                report.integration_points.len(),
                self.limits.integration_points,
            )?;
            writeln!(writer)?;
        }

        // Issues
        writeln!(writer, "## Truly Dead Files ({})", report.truly_dead_files.len())?;
        writeln!(writer)?;
        if report.truly_dead_files.is_empty() {
            writeln!(writer, "_None found._")?;
        } else {
            writeln!(
                writer,
                "No imports reference these files and they export nothing:"
            )?;
            writeln!(writer)?;
            for path in report.truly_dead_files.iter().take(self.limits.dead_files) {
                writeln!(writer, "- `{}`", path)?;
            }
            write_remainder(writer, report.truly_dead_files.len(), self.limits.dead_files)?;
        }
        writeln!(writer)?;

        if !report.import_cycles.is_empty() {
            writeln!(writer, "## Import Cycles")?;
            writeln!(writer)?;
            for (i, cycle) in report.import_cycles.iter().enumerate() {
                writeln!(writer, "{}. `{}`", i + 1, cycle.join(" -> "))?;
            }
            writeln!(writer)?;
        }

        if !report.unreadable_files.is_empty() {
            writeln!(writer, "## Unreadable Files")?;
            writeln!(writer)?;
            for file in &report.unreadable_files {
                writeln!(writer, "- `{}`: {}", file.path, file.error)?;
            }
            writeln!(writer)?;
        }

        let plan = &report.migration_recommendations;
        writeln!(writer, "## Migration Recommendations")?;
        writeln!(writer)?;
        for (heading, table) in [
            ("Keep", &plan.keep),
            ("Migrate", &plan.migrate),
            ("Delete", &plan.delete),
        ] {
            writeln!(writer, "### {}", heading)?;
            writeln!(writer)?;
            for (key, guidance) in table {
                writeln!(writer, "- **{}**: {}", key, guidance)?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by zonescan*")?;

        Ok(())
    }
}
