//! Export and memory-function extraction.
//!
//! Exports are only used as a "this file is meant to be used" signal, so the
//! extractor records names and never tries to match them to consumers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static MODULE_EXPORTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"module\.exports").expect("valid module.exports pattern"));

static NAMED_EXPORTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"exports\.(\w+)").expect("valid exports pattern"));

static ES6_EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(default\s+)?(?:const|let|var|function|class)?\s*(\w+)?")
        .expect("valid export pattern")
});

static EXPORT_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s*\{([^}]*)\}").expect("valid export list pattern"));

static FUNCTION_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+(\w+)").expect("valid function pattern"));

static CONST_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"const\s+(\w+)\s*=.*function").expect("valid const function pattern")
});

/// What a file exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSet {
    /// CommonJS `module.exports` is assigned.
    pub module_exports: bool,
    /// An ES6 `export default` is present.
    pub has_default: bool,
    /// Named export identifiers.
    pub names: BTreeSet<String>,
}

impl ExportSet {
    pub fn is_empty(&self) -> bool {
        !self.module_exports && !self.has_default && self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len() + usize::from(self.module_exports) + usize::from(self.has_default)
    }

    /// Flat list for reporting: `module.exports`, then `default`, then names.
    pub fn to_list(&self) -> Vec<String> {
        let mut list = Vec::with_capacity(self.len());
        if self.module_exports {
            list.push("module.exports".to_string());
        }
        if self.has_default {
            list.push("default".to_string());
        }
        list.extend(self.names.iter().cloned());
        list
    }
}

/// Extract the export set of a source file.
///
/// # Example
///
/// ```
/// use zonescan::analysis::extract_exports;
///
/// let exports = extract_exports("export const Foo = 1;\nexports.bar = 2;");
/// assert!(exports.names.contains("Foo"));
/// assert!(exports.names.contains("exports.bar"));
/// assert!(!exports.has_default);
/// ```
pub fn extract_exports(source: &str) -> ExportSet {
    let mut set = ExportSet {
        module_exports: MODULE_EXPORTS_RE.is_match(source),
        ..ExportSet::default()
    };

    for caps in NAMED_EXPORTS_RE.captures_iter(source) {
        set.names.insert(format!("exports.{}", &caps[1]));
    }

    for caps in ES6_EXPORT_RE.captures_iter(source) {
        if caps.get(1).is_some() {
            set.has_default = true;
        }
        if let Some(name) = caps.get(2) {
            if name.as_str() != "default" {
                set.names.insert(name.as_str().to_string());
            }
        }
    }

    for caps in EXPORT_LIST_RE.captures_iter(source) {
        for item in caps[1].split(',') {
            // `a as b` exports `b`
            let exported = item.split_whitespace().last();
            match exported {
                Some("default") => set.has_default = true,
                Some(name) if is_identifier(name) => {
                    set.names.insert(name.to_string());
                }
                _ => {}
            }
        }
    }

    set
}

/// Extract function names that belong to the memory domain.
///
/// A `function` declaration qualifies when its name contains one of
/// `keywords`; a `const x = ... function` binding only when it contains one
/// of `const_keywords`. The keyword's first letter may be in either case
/// (`getMemory`, `memoryLoad`).
pub fn extract_memory_functions(
    source: &str,
    keywords: &[String],
    const_keywords: &[String],
) -> BTreeSet<String> {
    let declared = matching_names(&FUNCTION_DECL_RE, source, keywords);
    let bound = matching_names(&CONST_FUNCTION_RE, source, const_keywords);
    declared.chain(bound).map(str::to_string).collect()
}

fn matching_names<'a>(
    re: &'a Regex,
    source: &'a str,
    keywords: &'a [String],
) -> impl Iterator<Item = &'a str> + 'a {
    re.captures_iter(source)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(move |name| keywords.iter().any(|k| contains_keyword(name, k)))
}

fn contains_keyword(name: &str, keyword: &str) -> bool {
    let mut chars = keyword.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest = chars.as_str();
    let lower = format!("{}{}", first.to_ascii_lowercase(), rest);
    let upper = format!("{}{}", first.to_ascii_uppercase(), rest);
    name.contains(&lower) || name.contains(&upper)
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
