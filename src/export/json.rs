//! JSON export implementation.
//!
//! The JSON document is the scan's durable artifact: it carries every field
//! of the report, including full per-file records.

use super::Exporter;
use crate::report::DiagnosticReport;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &DiagnosticReport, writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

/// File name of the artifact for a report.
pub fn artifact_name(report: &DiagnosticReport) -> String {
    format!("dual_memory_scan_{}.json", report.scan_timestamp)
}

/// Write the report as JSON into `dir`, creating it if needed.
/// Returns the path written.
pub fn write_artifact(report: &DiagnosticReport, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(artifact_name(report));
    let mut file = fs::File::create(&path)?;
    JsonExporter.export(report, &mut file)?;
    file.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_report;
    use tempfile::TempDir;

    fn parsed() -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(&sample_report(), &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = parsed();

        assert_eq!(parsed["scan_timestamp"], "20250102_030405");
        assert_eq!(parsed["project_root"], "/project");
        assert_eq!(parsed["architecture_summary"]["echo_files"], 1);
        assert_eq!(parsed["architecture_summary"]["qlib_files"], 1);
        assert_eq!(parsed["architecture_summary"]["bridge_files"], 1);
        assert_eq!(parsed["architecture_summary"]["truly_dead_files"], 2);
    }

    #[test]
    fn test_json_export_file_records() {
        let parsed = parsed();

        let core = &parsed["echo_system"]["core"]["src/echo/core.js"];
        assert_eq!(core["size"], 120);
        assert_eq!(core["lines"], 6);
        assert_eq!(core["export_count"], 1);
        assert_eq!(core["exports"][0], "Foo");
        assert_eq!(core["functions"][0], "loadMemory");
        assert_eq!(core["imported_by"][0], "src/glue, v2.js");

        let glue = &parsed["bridge_files"]["bridge"]["src/glue, v2.js"];
        assert_eq!(glue["type"], "bridge");
        assert_eq!(glue["import_count"], 2);
        assert_eq!(glue["imports"][0]["type"], "require");
        assert_eq!(glue["imports"][0]["path"], "./echo/core");
        assert_eq!(glue["imports"][1]["type"], "import");
        assert_eq!(glue["imports"][1]["resolved"], "backend/qlib/index.js");
    }

    #[test]
    fn test_json_export_integration_points() {
        let parsed = parsed();

        let points = parsed["integration_points"].as_array().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["file"], "src/glue, v2.js");
        assert_eq!(points[0]["echo_deps"], 1);
        assert_eq!(points[0]["qlib_deps"], 1);
        assert_eq!(parsed["bridges"][0]["type"], "bridge");
        assert!(parsed["migration_recommendations"]["delete"]["z_archive"].is_string());
    }

    #[test]
    fn test_json_round_trips_into_report() {
        let report = sample_report();
        let mut output = Vec::new();
        JsonExporter.export(&report, &mut output).unwrap();

        let back: DiagnosticReport = serde_json::from_slice(&output).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_write_artifact() {
        let dir = TempDir::new().unwrap();
        let logs = dir.path().join("logs");
        let report = sample_report();

        let path = write_artifact(&report, &logs).unwrap();

        assert_eq!(path, logs.join("dual_memory_scan_20250102_030405.json"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("\"truly_dead_files\""));
    }
}
