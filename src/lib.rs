//! zonescan - dual-architecture source scanner
//!
//! This crate walks a JavaScript/TypeScript source tree, builds an
//! approximate import graph from textual `require`/`import` statements,
//! assigns every file to an architectural zone, and reports files that
//! nothing references ("truly dead").
//!
//! ```no_run
//! use chrono::Local;
//! use zonescan::{ReportBuilder, ScanConfig, Scanner};
//!
//! let scanner = Scanner::new(ScanConfig::default())?;
//! let output = scanner.scan(std::path::Path::new("."))?;
//! let report = ReportBuilder::new().build(&output, Local::now());
//! println!("{} dead files", report.truly_dead_files.len());
//! # Ok::<(), zonescan::ScanError>(())
//! ```

pub mod analysis;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod report;
pub mod scanner;

pub use classify::{BridgeKind, Classification, Classifier, Zone};
pub use config::ScanConfig;
pub use error::{ConfigError, ScanError, ScanResult};
pub use report::{DiagnosticReport, ReportBuilder};
pub use scanner::{ScanOutput, Scanner};
