//! Dead-file detection.
//!
//! Reachability here is direct textual reference, not transitive closure: a
//! file imported only by a dead file still counts as reachable. This keeps
//! the pass a single linear sweep and is a known limitation of the heuristic.

use crate::classify::PatternSet;
use crate::config::ScanConfig;
use crate::error::ScanResult;
use crate::scanner::SourceFile;

use super::ReachabilitySet;

/// Decides which files are truly dead.
#[derive(Debug, Clone)]
pub struct ReachabilityAnalyzer {
    entry_points: Vec<String>,
    utilities: PatternSet,
}

impl ReachabilityAnalyzer {
    pub fn new(entry_points: Vec<String>, utility_patterns: &[String]) -> ScanResult<Self> {
        Ok(Self {
            entry_points: entry_points.into_iter().filter(|e| !e.is_empty()).collect(),
            utilities: PatternSet::from_patterns(utility_patterns)?,
        })
    }

    pub fn from_config(config: &ScanConfig) -> ScanResult<Self> {
        Self::new(config.entry_points.clone(), &config.utility_patterns)
    }

    /// True if the path ends with a configured entry-point suffix.
    pub fn is_entry_point(&self, path: &str) -> bool {
        self.entry_points.iter().any(|ep| path.ends_with(ep.as_str()))
    }

    /// True if the path matches a utility pattern.
    pub fn is_utility(&self, path: &str) -> bool {
        self.utilities.is_match(path)
    }

    /// Whether a single file is dead given the project's reachability set.
    pub fn is_dead(&self, file: &SourceFile, reachable: &ReachabilitySet) -> bool {
        !file.is_skipped()
            && !self.is_entry_point(&file.path)
            && !self.is_utility(&file.path)
            && !reachable.contains(&file.path)
            && !file.has_exports()
    }

    /// Paths of all dead files, sorted.
    pub fn find_dead(&self, files: &[SourceFile], reachable: &ReachabilitySet) -> Vec<String> {
        let mut dead: Vec<String> = files
            .iter()
            .filter(|file| self.is_dead(file, reachable))
            .map(|file| file.path.clone())
            .collect();
        dead.sort();
        dead
    }
}
