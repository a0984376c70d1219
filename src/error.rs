//! Error types shared by the scanner, configuration and exporters.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scan.
///
/// Per-file problems (unreadable files, unresolvable imports) are never
/// surfaced through this type; they are recorded in the report instead.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading a scan configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
