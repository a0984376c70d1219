//! Export functionality for diagnostic reports.
//!
//! This module provides exporters for outputting scan results in various
//! formats: JSON (the durable artifact), CSV, and Markdown (the console
//! summary).

pub mod csv;
pub mod json;
pub mod markdown;

pub use json::write_artifact;

use crate::config::ScanConfig;
use crate::report::DiagnosticReport;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - one row per scanned file
    Csv,
    /// Markdown format - human-readable summary
    #[default]
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Limits for the human-readable summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLimits {
    /// Files listed per zone category.
    pub per_category: usize,
    pub bridges: usize,
    pub dead_files: usize,
    pub integration_points: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            per_category: 3,
            bridges: 5,
            dead_files: 10,
            integration_points: 5,
        }
    }
}

impl PreviewLimits {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            per_category: config.preview_limit,
            dead_files: config.dead_preview_limit,
            ..Self::default()
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &DiagnosticReport, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    report: &DiagnosticReport,
    limits: PreviewLimits,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(report, writer),
        ExportFormat::Csv => csv::CsvExporter.export(report, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter::new(limits).export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(
    format: ExportFormat,
    report: &DiagnosticReport,
    limits: PreviewLimits,
) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, limits, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "markdown".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert_eq!(
            "md".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert!("invalid".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Csv), "csv");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_preview_limits_from_config() {
        let mut config = ScanConfig::default();
        config.preview_limit = 7;
        config.dead_preview_limit = 20;
        let limits = PreviewLimits::from_config(&config);
        assert_eq!(limits.per_category, 7);
        assert_eq!(limits.dead_files, 20);
        assert_eq!(limits.bridges, 5);
    }

    #[test]
    fn test_export_to_string_every_format() {
        let report = test_support::sample_report();
        for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Markdown] {
            let out = export_to_string(format, &report, PreviewLimits::default()).unwrap();
            assert!(out.contains("orphan.js"), "{} output lacks orphan.js", format);
        }
    }
}
