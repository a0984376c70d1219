//! Scanner configuration.
//!
//! Every knob the scanner uses lives here: which directories and extensions
//! are walked, how the two architectures are recognised, which files count as
//! entry points or utilities. Defaults describe the Echo / QLib layout; a TOML
//! file can override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A regular expression with a category name attached.
///
/// The name is reported as the file's category inside its zone. A file whose
/// path also matches `exclude` is not considered a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

impl NamedPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            exclude: None,
        }
    }

    /// Adds an exclusion pattern.
    pub fn excluding(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }
}

/// How one architecture (Echo or QLib) is recognised.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ZoneSpec {
    /// Directory conventions matched against a file's project-relative path.
    pub path_patterns: Vec<NamedPattern>,
    /// Case-sensitive substrings that mark a resolved import target as
    /// belonging to this zone, in addition to `path_patterns`.
    pub import_tokens: Vec<String>,
    /// Identifiers whose presence in a file's text makes it a consumer.
    pub interface_markers: Vec<String>,
    /// Case-insensitive token that makes any path containing it a consumer.
    pub name_token: Option<String>,
    /// Path substrings tried in order to name the category of a file that
    /// matched `path_patterns`. Empty = the most specific pattern's name.
    pub category_keywords: Vec<String>,
    /// Category for a matched file containing none of `category_keywords`.
    pub fallback_category: Option<String>,
}

/// Configuration for a scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names pruned during the walk.
    pub exclude_dirs: Vec<String>,
    /// Extensions (with leading dot) of files that are scanned.
    pub scan_extensions: Vec<String>,
    /// Extensions tried when resolving an extensionless relative import.
    pub resolve_extensions: Vec<String>,
    pub echo: ZoneSpec,
    pub qlib: ZoneSpec,
    pub legacy_patterns: Vec<NamedPattern>,
    /// Shared memory directories whose files are bridge candidates.
    pub shared_memory_dirs: Vec<String>,
    /// Identifiers that mark a shared-memory file as part of the live system.
    pub active_markers: Vec<String>,
    /// Lowercase path fragments of diagnostic/test files excluded from zones.
    pub skip_keywords: Vec<String>,
    /// Path suffixes of files that are never dead.
    pub entry_points: Vec<String>,
    /// Regex patterns for utility files that are never dead.
    pub utility_patterns: Vec<String>,
    /// Keywords selecting memory-domain `function` declarations.
    pub domain_keywords: Vec<String>,
    /// Keywords selecting memory-domain `const x = ... function` bindings.
    pub const_function_keywords: Vec<String>,
    /// Worker threads for per-file analysis. 0 or unset = rayon default.
    pub threads: Option<usize>,
    /// Files shown per category in the console summary.
    pub preview_limit: usize,
    /// Dead files shown in the console summary.
    pub dead_preview_limit: usize,
    /// Where the JSON artifact is written. Unset = `<root>/logs`.
    pub output_dir: Option<PathBuf>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: strings(&[
                "node_modules",
                "dist",
                "build",
                ".git",
                "coverage",
                "public",
                "static",
                ".next",
                ".cache",
                "vendor",
                "venv",
                "z__archive",
            ]),
            scan_extensions: strings(&[".js", ".jsx", ".css", ".html"]),
            resolve_extensions: strings(&[".js", ".jsx"]),
            echo: ZoneSpec {
                path_patterns: vec![
                    NamedPattern::new("core", r"src/echo/"),
                    NamedPattern::new("engines", r"src/echo/engines/"),
                    NamedPattern::new("memory", r"src/echo/memory/"),
                ],
                import_tokens: strings(&["echo"]),
                interface_markers: Vec::new(),
                name_token: None,
                category_keywords: strings(&["engines", "memory", "core"]),
                fallback_category: Some("other".to_string()),
            },
            qlib: ZoneSpec {
                path_patterns: vec![
                    NamedPattern::new("backend", r"backend/qlib/"),
                    NamedPattern::new("interface", r"QLibInterface"),
                    NamedPattern::new("capsules", r"capsule(?:s|Retriever|Writer)?"),
                ],
                import_tokens: strings(&["qlib"]),
                interface_markers: strings(&["QLibInterface"]),
                name_token: Some("qlib".to_string()),
                ..ZoneSpec::default()
            },
            legacy_patterns: vec![
                NamedPattern::new("components", r"components/").excluding(r"components/utils"),
                NamedPattern::new("old_memory", r"components/.*(?:memory|context|vault)"),
                NamedPattern::new("backup", r"components-backup/"),
            ],
            shared_memory_dirs: strings(&["src/memory/"]),
            active_markers: strings(&[
                "MemoryVaultManager",
                "QLibInterface",
                "ChatOrchestrator",
                "PromptBuilder",
                "CapsuleRetriever",
                "exports",
            ]),
            skip_keywords: strings(&["diag", "test", "debug", "audit"]),
            entry_points: strings(&[
                "main.js",
                "index.js",
                "preload.js",
                "main/app.js",
                "main/windows.js",
                "src/index.js",
                "src/app.js",
            ]),
            utility_patterns: strings(&[
                r"test/",
                r"tools/",
                r"diag.*\.js$",
                r"debug.*\.js$",
                r"audit.*\.js$",
                r"\.html$",
                r"\.css$",
            ]),
            domain_keywords: strings(&["memory", "capsule", "context", "vault"]),
            const_function_keywords: strings(&["memory", "capsule"]),
            threads: None,
            preview_limit: 3,
            dead_preview_limit: 10,
            output_dir: None,
        }
    }
}

impl ScanConfig {
    /// Loads a configuration from a TOML file. Missing fields keep defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the effective thread count, 0 meaning rayon's default.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    /// Returns the directory the JSON artifact is written to.
    pub fn effective_output_dir(&self, root: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| root.join("logs"))
    }

    /// Returns true if a file name carries one of the scanned extensions.
    pub fn is_scanned_file(&self, file_name: &str) -> bool {
        self.scan_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }

    /// Returns true if a directory name is pruned from the walk.
    pub fn is_excluded_dir(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == dir_name)
    }
}
