//! Textual import extraction for CommonJS / ES module sources.
//!
//! Extraction is regex based and line-unaware: only the specifier string
//! matters, so a statement the patterns do not recognise contributes nothing
//! rather than failing the file.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\s*\(\s*['"`]([^'"`]+)['"`]\s*\)"#).expect("valid require pattern")
});

static ES6_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+.*?\s+from\s+['"`]([^'"`]+)['"`]"#).expect("valid import pattern")
});

/// The syntactic form an import was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// CommonJS call: `require('module')`. Resolved at runtime.
    Require,
    /// ES6 declaration: `import x from 'module'`. Static.
    #[serde(rename = "import")]
    Es6,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Require => write!(f, "require"),
            ImportKind::Es6 => write!(f, "import"),
        }
    }
}

/// An import specifier found in source text, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    /// The module specifier (e.g. "lodash", "./utils", "../echo/core").
    pub specifier: String,
    pub kind: ImportKind,
    /// Byte offset of the statement in the source text.
    pub offset: usize,
}

/// A directed import edge from one project file to another.
///
/// `resolved` is `None` for external packages and for relative specifiers
/// that match no file; such edges are evidence only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    #[serde(rename = "type")]
    pub kind: ImportKind,
    #[serde(rename = "path")]
    pub specifier: String,
    pub resolved: Option<String>,
}

impl ImportEdge {
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Returns true if a specifier starts with a relative-path marker.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Extract every import specifier from source text.
///
/// Both forms are scanned over the whole text and the results are ordered
/// by first occurrence. Duplicates are kept: each occurrence is an edge.
///
/// # Example
///
/// ```
/// use zonescan::analysis::{extract_imports, ImportKind};
///
/// let source = "import a from './a';\nconst b = require('./b');";
/// let imports = extract_imports(source);
///
/// assert_eq!(imports.len(), 2);
/// assert_eq!(imports[0].specifier, "./a");
/// assert_eq!(imports[0].kind, ImportKind::Es6);
/// assert_eq!(imports[1].kind, ImportKind::Require);
/// ```
pub fn extract_imports(source: &str) -> Vec<RawImport> {
    let mut imports: Vec<RawImport> = REQUIRE_RE
        .captures_iter(source)
        .map(|c| (c, ImportKind::Require))
        .chain(ES6_IMPORT_RE.captures_iter(source).map(|c| (c, ImportKind::Es6)))
        .filter_map(|(caps, kind)| {
            let whole = caps.get(0)?;
            let specifier = caps.get(1)?;
            Some(RawImport {
                specifier: specifier.as_str().to_string(),
                kind,
                offset: whole.start(),
            })
        })
        .collect();

    // Stable: a require nested inside an import line keeps its relative order.
    imports.sort_by_key(|i| i.offset);
    imports
}
