//! Relative import resolution.
//!
//! Project paths are forward-slash separated and relative to the scan root,
//! regardless of platform, so they compare equal across the whole scan.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::imports::is_relative_specifier;

/// Resolves relative import specifiers to files inside the project.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    extensions: Vec<String>,
}

impl PathResolver {
    /// Create a resolver for `root`, trying `extensions` (with leading dot)
    /// in the given order.
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    /// Resolve `specifier` as written in the file at project path `origin`.
    ///
    /// Returns `None` for external packages and for relative specifiers that
    /// match no existing file.
    pub fn resolve(&self, specifier: &str, origin: &str) -> Option<String> {
        if !is_relative_specifier(specifier) {
            return None;
        }

        let resolved = self
            .candidates(specifier, origin)
            .into_iter()
            .find(|candidate| self.root.join(candidate).is_file());

        if resolved.is_none() {
            debug!(origin, specifier, "unresolved import");
        }
        resolved
    }

    /// Candidate project paths for a relative specifier, in precedence order:
    /// the literal path, the path plus each extension, then `index` plus
    /// each extension inside the path.
    pub fn candidates(&self, specifier: &str, origin: &str) -> Vec<String> {
        let Some(target) = join_relative(origin, specifier) else {
            return Vec::new();
        };

        let mut candidates = Vec::with_capacity(1 + self.extensions.len() * 2);
        if !target.is_empty() {
            candidates.push(target.clone());
            for ext in &self.extensions {
                candidates.push(format!("{}{}", target, ext));
            }
        }
        let index_base = if target.is_empty() {
            "index".to_string()
        } else {
            format!("{}/index", target)
        };
        for ext in &self.extensions {
            candidates.push(format!("{}{}", index_base, ext));
        }
        candidates
    }
}

/// Join a relative specifier onto the directory of `origin` and normalize
/// it lexically. Returns `None` if the result climbs above the root.
pub fn join_relative(origin: &str, specifier: &str) -> Option<String> {
    let mut parts: Vec<&str> = origin.split('/').filter(|p| !p.is_empty()).collect();
    // Drop the file name.
    parts.pop();

    for segment in specifier.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    Some(parts.join("/"))
}

/// Convert a path under `root` into a forward-slash project path.
pub fn to_project_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
