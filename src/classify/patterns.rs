//! Compiled path-convention patterns.

use regex::Regex;

use crate::config::{NamedPattern, ZoneSpec};
use crate::error::{ScanError, ScanResult};

fn compile(pattern: &str) -> ScanResult<Regex> {
    Regex::new(pattern).map_err(|source| ScanError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    name: String,
    regex: Regex,
    exclude: Option<Regex>,
}

impl CompiledPattern {
    /// Length of the matched span, if the path matches and is not excluded.
    fn match_len(&self, path: &str) -> Option<usize> {
        if self.exclude.as_ref().is_some_and(|ex| ex.is_match(path)) {
            return None;
        }
        self.regex.find(path).map(|m| m.len())
    }
}

/// An ordered set of named regex patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Compile named patterns, failing on the first invalid regex.
    pub fn compile(patterns: &[NamedPattern]) -> ScanResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| -> ScanResult<CompiledPattern> {
                Ok(CompiledPattern {
                    name: p.name.clone(),
                    regex: compile(&p.pattern)?,
                    exclude: p.exclude.as_deref().map(compile).transpose()?,
                })
            })
            .collect::<ScanResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Compile bare patterns; each pattern is its own name.
    pub fn from_patterns(patterns: &[String]) -> ScanResult<Self> {
        let named: Vec<NamedPattern> = patterns
            .iter()
            .map(|p| NamedPattern::new(p.clone(), p.clone()))
            .collect();
        Self::compile(&named)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.match_len(path).is_some())
    }

    /// Name of the most specific matching pattern: the one with the longest
    /// match span, the earliest on ties.
    pub fn best_match(&self, path: &str) -> Option<&str> {
        let mut best: Option<(&CompiledPattern, usize)> = None;
        for pattern in &self.patterns {
            if let Some(len) = pattern.match_len(path) {
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((pattern, len));
                }
            }
        }
        best.map(|(p, _)| p.name.as_str())
    }
}

/// A compiled [`ZoneSpec`].
#[derive(Debug, Clone)]
pub struct ZoneMatcher {
    paths: PatternSet,
    import_tokens: Vec<String>,
    interface_markers: Vec<String>,
    name_token: Option<String>,
    category_keywords: Vec<String>,
    fallback_category: Option<String>,
}

impl ZoneMatcher {
    pub fn compile(spec: &ZoneSpec) -> ScanResult<Self> {
        Ok(Self {
            paths: PatternSet::compile(&spec.path_patterns)?,
            import_tokens: spec.import_tokens.clone(),
            interface_markers: spec.interface_markers.clone(),
            name_token: spec
                .name_token
                .as_ref()
                .filter(|t| !t.is_empty())
                .map(|t| t.to_lowercase()),
            category_keywords: spec
                .category_keywords
                .iter()
                .filter(|k| !k.is_empty())
                .cloned()
                .collect(),
            fallback_category: spec.fallback_category.clone(),
        })
    }

    /// Category of a file living in this zone's directories.
    ///
    /// The first category keyword found in the path wins, then the fallback
    /// category, then the name of the most specific matching pattern.
    pub fn path_category(&self, path: &str) -> Option<&str> {
        let best = self.paths.best_match(path)?;
        let keyword = self
            .category_keywords
            .iter()
            .find(|k| path.contains(k.as_str()))
            .map(String::as_str);
        Some(keyword.or(self.fallback_category.as_deref()).unwrap_or(best))
    }

    /// Whether a resolved import target belongs to this zone.
    pub fn owns_target(&self, target: &str) -> bool {
        self.paths.is_match(target)
            || self
                .import_tokens
                .iter()
                .any(|t| !t.is_empty() && target.contains(t.as_str()))
    }

    /// Whether source text references one of the zone's interface markers.
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        self.interface_markers
            .iter()
            .any(|m| !m.is_empty() && text.contains(m.as_str()))
    }

    /// Whether the path contains the zone's name token, ignoring case.
    pub fn is_named_in(&self, path: &str) -> bool {
        self.name_token
            .as_ref()
            .is_some_and(|t| path.to_lowercase().contains(t.as_str()))
    }
}
