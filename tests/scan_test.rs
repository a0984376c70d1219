//! Integration tests for the full scan pipeline
//!
//! Each test lays out a small project on disk, runs a scan, builds the
//! report, and checks the classification and dead-file invariants.

use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use zonescan::config::{NamedPattern, ZoneSpec};
use zonescan::export::{self, ExportFormat, PreviewLimits};
use zonescan::{
    BridgeKind, Classification, DiagnosticReport, ReportBuilder, ScanConfig, ScanError, Scanner,
    Zone,
};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Conventions with `zoneA/` and `zoneB/` as the two architectures and no
/// content heuristics.
fn two_zone_config() -> ScanConfig {
    ScanConfig {
        echo: ZoneSpec {
            path_patterns: vec![NamedPattern::new("core", "zoneA/")],
            ..ZoneSpec::default()
        },
        qlib: ZoneSpec {
            path_patterns: vec![NamedPattern::new("interface", "zoneB/")],
            ..ZoneSpec::default()
        },
        ..ScanConfig::default()
    }
}

fn scan_with(config: ScanConfig, root: &Path) -> DiagnosticReport {
    let output = Scanner::new(config).unwrap().scan(root).unwrap();
    ReportBuilder::new().build(&output, fixed_time())
}

/// Two zones, one glue file importing both, and an orphan.
fn create_two_zone_project(root: &Path) {
    write(root, "zoneA/core.js", "export const Foo = 1;\n");
    write(root, "zoneB/iface.js", "export function Bar() {}\n");
    write(
        root,
        "bridge/glue.js",
        "const core = require('../zoneA/core');\nimport { Bar } from '../zoneB/iface';\nmodule.exports = { core, Bar };\n",
    );
    write(root, "orphan.js", "console.log('nobody loads me');\n");
}

#[test]
fn test_two_zone_project() {
    let dir = TempDir::new().unwrap();
    create_two_zone_project(dir.path());

    let report = scan_with(two_zone_config(), dir.path());
    let summary = &report.architecture_summary;

    assert_eq!(summary.files_scanned, 4);
    assert_eq!(summary.echo_files, 1);
    assert_eq!(summary.qlib_files, 1);
    assert_eq!(summary.bridge_files, 1);
    assert_eq!(report.truly_dead_files, vec!["orphan.js"]);

    assert_eq!(report.integration_points.len(), 1);
    let point = &report.integration_points[0];
    assert_eq!(point.file, "bridge/glue.js");
    assert_eq!(point.echo_deps, 1);
    assert_eq!(point.qlib_deps, 1);

    assert_eq!(report.bridges.len(), 1);
    assert_eq!(report.bridges[0].kind, BridgeKind::Bridge);
    assert_eq!(report.zone_of("orphan.js"), Some(Zone::Unclassified));
}

#[test]
fn test_bare_specifiers_never_resolve() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lodash.js", "");
    write(
        dir.path(),
        "app.js",
        "const _ = require('lodash');\nimport React from 'react';\n",
    );

    let output = Scanner::new(ScanConfig::default())
        .unwrap()
        .scan(dir.path())
        .unwrap();
    let app = output.file("app.js").unwrap();

    assert_eq!(app.imports.len(), 2);
    assert!(app.imports.iter().all(|edge| edge.resolved.is_none()));
    assert!(!output.reachable.contains("lodash.js"));
    // Non-relative specifiers are not reported as unresolved either.
    let report = ReportBuilder::new().build(&output, fixed_time());
    assert!(report.unresolved_imports.is_empty());
    assert!(report.is_dead("lodash.js"));
}

#[test]
fn test_scan_is_idempotent() {
    let dir = TempDir::new().unwrap();
    create_two_zone_project(dir.path());
    write(dir.path(), "zoneA/extra/more.js", "require('../core');\n");
    write(dir.path(), "zoneB/cycle1.js", "require('./cycle2');\n");
    write(dir.path(), "zoneB/cycle2.js", "require('./cycle1');\n");

    let first = scan_with(two_zone_config(), dir.path());
    let second = scan_with(two_zone_config(), dir.path());

    assert_eq!(first, second);
    assert_eq!(
        first.import_cycles,
        vec![vec!["zoneB/cycle1.js".to_string(), "zoneB/cycle2.js".to_string()]]
    );
}

#[test]
fn test_exports_and_entry_points_are_never_dead() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.js", "// entry\n");
    write(dir.path(), "src/index.js", "");
    write(dir.path(), "lib/helpers.js", "exports.helper = () => 1;\n");
    write(dir.path(), "lib/widget.jsx", "export default function Widget() {}\n");
    write(dir.path(), "lib/unused.js", "const x = 1;\n");

    let output = Scanner::new(ScanConfig::default())
        .unwrap()
        .scan(dir.path())
        .unwrap();

    for file in &output.files {
        if file.has_exports() || file.path.ends_with("main.js") || file.path.ends_with("index.js")
        {
            assert!(!output.dead.contains(&file.path), "{} marked dead", file.path);
        }
    }
    assert_eq!(output.dead, vec!["lib/unused.js"]);
}

#[test]
fn test_every_file_lands_in_exactly_one_bucket() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/echo/core/ai.js", "");
    write(dir.path(), "backend/qlib/vault.js", "");
    write(dir.path(), "src/memory/store.js", "class MemoryVaultManager {}\n");
    write(dir.path(), "src/memory/old.js", "var x;\n");
    write(dir.path(), "components/Chat.jsx", "");
    write(dir.path(), "tools/diagnose.js", "");
    write(dir.path(), "misc/thing.js", "");
    write(dir.path(), "styles/site.css", "body {}\n");

    let output = Scanner::new(ScanConfig::default())
        .unwrap()
        .scan(dir.path())
        .unwrap();
    let report = ReportBuilder::new().build(&output, fixed_time());

    for file in &output.files {
        let buckets = Zone::ALL
            .into_iter()
            .filter(|zone| report.bucket(*zone).contains(&file.path))
            .count();
        match &file.classification {
            Classification::Skipped { .. } => {
                assert_eq!(buckets, 0);
                assert!(report.skipped_files.contains(&file.path));
                assert!(!report.is_dead(&file.path));
            }
            Classification::Zoned { .. } => assert_eq!(buckets, 1, "{}", file.path),
        }
    }

    let zoned: usize = Zone::ALL.into_iter().map(|z| report.zone_count(z)).sum();
    assert_eq!(zoned + report.skipped_files.len(), output.files_scanned());
    assert_eq!(report.zone_of("src/memory/store.js"), Some(Zone::Bridge));
    assert_eq!(report.zone_of("src/memory/old.js"), Some(Zone::Legacy));
}

#[test]
fn test_bridge_detection_beats_own_path() {
    let dir = TempDir::new().unwrap();
    create_two_zone_project(dir.path());
    write(
        dir.path(),
        "zoneA/adapter.js",
        "const c = require('./core');\nconst i = require('../zoneB/iface');\n",
    );

    let report = scan_with(two_zone_config(), dir.path());

    assert_eq!(report.zone_of("zoneA/adapter.js"), Some(Zone::Bridge));
    assert_eq!(report.zone_of("zoneA/core.js"), Some(Zone::Echo));
    assert_eq!(report.integration_points.len(), 2);
}

#[test]
fn test_sibling_file_wins_over_index() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib.js", "");
    write(dir.path(), "lib/index.js", "");
    write(dir.path(), "util/index.js", "");
    write(dir.path(), "app.js", "require('./lib');\nrequire('./util');\n");

    let output = Scanner::new(ScanConfig::default())
        .unwrap()
        .scan(dir.path())
        .unwrap();
    let app = output.file("app.js").unwrap();

    assert_eq!(app.imports[0].resolved.as_deref(), Some("lib.js"));
    assert_eq!(app.imports[1].resolved.as_deref(), Some("util/index.js"));
}

#[test]
fn test_excluded_directories_are_pruned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "node_modules/pkg/index.js", "");
    write(dir.path(), "z__archive/old.js", "");
    write(dir.path(), "app.js", "");
    write(dir.path(), "README.md", "# readme\n");

    let output = Scanner::new(ScanConfig::default())
        .unwrap()
        .scan(dir.path())
        .unwrap();

    assert_eq!(output.files_scanned(), 1);
    assert!(output.file("app.js").is_some());
}

#[test]
fn test_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    let result = Scanner::new(ScanConfig::default())
        .unwrap()
        .scan(&dir.path().join("absent"));

    assert!(matches!(result, Err(ScanError::RootNotFound(_))));
}

#[test]
fn test_config_file_overrides_conventions() {
    let dir = TempDir::new().unwrap();
    create_two_zone_project(dir.path());
    let config_path = dir.path().join("zonescan.toml");
    fs::write(
        &config_path,
        r#"
entry_points = ["orphan.js"]

[echo]
path_patterns = [{ name = "core", pattern = "zoneA/" }]

[qlib]
path_patterns = [{ name = "interface", pattern = "zoneB/" }]
"#,
    )
    .unwrap();

    let config = ScanConfig::from_file(&config_path).unwrap();
    let report = scan_with(config, dir.path());

    assert_eq!(report.architecture_summary.bridge_files, 1);
    assert!(report.truly_dead_files.is_empty());
}

#[test]
fn test_artifact_and_summary_output() {
    let dir = TempDir::new().unwrap();
    create_two_zone_project(dir.path());
    let config = two_zone_config();
    let out_dir = config.effective_output_dir(dir.path());
    let report = scan_with(config, dir.path());

    let path = export::write_artifact(&report, &out_dir).unwrap();
    assert_eq!(
        path,
        dir.path().join("logs").join("dual_memory_scan_20250601_120000.json")
    );
    let saved: DiagnosticReport =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, report);

    let summary =
        export::export_to_string(ExportFormat::Markdown, &report, PreviewLimits::default())
            .unwrap();
    assert!(summary.contains("- `orphan.js`"));
    assert!(summary.contains("| `bridge/glue.js` | 1 | 1 |"));
}
