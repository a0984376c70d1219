//! CSV export implementation.
//!
//! Exports one row per classified file for spreadsheet use.

use super::Exporter;
use crate::classify::Zone;
use crate::report::DiagnosticReport;
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, report: &DiagnosticReport, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "path,zone,category,size,lines,imports,exports,imported_by,dead")?;

        for zone in Zone::ALL {
            for (category, files) in &report.bucket(zone).categories {
                for record in files.values() {
                    writeln!(
                        writer,
                        "{},{},{},{},{},{},{},{},{}",
                        Self::escape_field(&record.path),
                        zone,
                        Self::escape_field(category),
                        record.size,
                        record.lines,
                        record.import_count,
                        record.export_count,
                        record.imported_by.len(),
                        report.is_dead(&record.path)
                    )?;
                }
            }
        }

        Ok(())
    }
}
