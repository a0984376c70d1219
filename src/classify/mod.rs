//! Zone classification.
//!
//! Classification is an ordered table of rules. Each rule pairs a predicate
//! with the zone it assigns; the first rule whose predicate holds decides the
//! file's zone, and files matching no rule are [`Zone::Unclassified`].
//!
//! | # | Predicate                                    | Zone / category          |
//! |---|----------------------------------------------|--------------------------|
//! | 1 | resolved imports span Echo and QLib          | Bridge / `bridge`        |
//! | 2 | Echo path convention                         | Echo / path keyword      |
//! | 3 | QLib path convention                         | QLib / pattern name      |
//! | 4 | text mentions the QLib interface             | QLib / `consumers`       |
//! | 5 | path contains the QLib name token            | QLib / `consumers`       |
//! | 6 | shared memory dir + active marker in text    | Bridge / `memory_core`   |
//! | 7 | shared memory dir, no marker                 | Legacy / `old_memory`    |
//! | 8 | legacy path convention                       | Legacy / pattern name    |
//! | 9 | diagnostic/test/debug/audit keyword in path  | skipped                  |
//!
//! Bridge detection comes first because a file's own location cannot tell
//! that it spans both zones; only its imports can. A shared memory file that
//! already looks like QLib stays QLib.

mod patterns;
mod zone;

pub use patterns::{PatternSet, ZoneMatcher};
pub use zone::{BridgeKind, Classification, Zone};

use serde::{Deserialize, Serialize};

use crate::analysis::ImportEdge;
use crate::config::ScanConfig;
use crate::error::ScanResult;

/// One of the two architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Echo,
    Qlib,
}

/// A condition evaluated against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    SpansBothZones,
    SharedMemory { active: bool },
    ZonePath(Side),
    InterfaceMention(Side),
    NameToken(Side),
    LegacyPath,
    SkipKeyword,
}

/// A classification rule. `zone: None` means the file is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub predicate: Predicate,
    pub zone: Option<Zone>,
}

/// Classification rules in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        predicate: Predicate::SpansBothZones,
        zone: Some(Zone::Bridge),
    },
    Rule {
        predicate: Predicate::ZonePath(Side::Echo),
        zone: Some(Zone::Echo),
    },
    Rule {
        predicate: Predicate::ZonePath(Side::Qlib),
        zone: Some(Zone::Qlib),
    },
    Rule {
        predicate: Predicate::InterfaceMention(Side::Qlib),
        zone: Some(Zone::Qlib),
    },
    Rule {
        predicate: Predicate::NameToken(Side::Qlib),
        zone: Some(Zone::Qlib),
    },
    Rule {
        predicate: Predicate::SharedMemory { active: true },
        zone: Some(Zone::Bridge),
    },
    Rule {
        predicate: Predicate::SharedMemory { active: false },
        zone: Some(Zone::Legacy),
    },
    Rule {
        predicate: Predicate::LegacyPath,
        zone: Some(Zone::Legacy),
    },
    Rule {
        predicate: Predicate::SkipKeyword,
        zone: None,
    },
];

/// Category given to files that match no rule.
pub const UNMATCHED: &str = "unmatched";

/// Resolved import counts into each architecture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDeps {
    pub echo: usize,
    pub qlib: usize,
}

impl ZoneDeps {
    pub fn spans_both(&self) -> bool {
        self.echo > 0 && self.qlib > 0
    }
}

/// Assigns files to zones.
#[derive(Debug, Clone)]
pub struct Classifier {
    echo: ZoneMatcher,
    qlib: ZoneMatcher,
    legacy: PatternSet,
    shared_memory_dirs: Vec<String>,
    active_markers: Vec<String>,
    skip_keywords: Vec<String>,
}

impl Classifier {
    /// Compile the classifier from configuration.
    pub fn from_config(config: &ScanConfig) -> ScanResult<Self> {
        Ok(Self {
            echo: ZoneMatcher::compile(&config.echo)?,
            qlib: ZoneMatcher::compile(&config.qlib)?,
            legacy: PatternSet::compile(&config.legacy_patterns)?,
            shared_memory_dirs: config.shared_memory_dirs.clone(),
            active_markers: config.active_markers.clone(),
            skip_keywords: config
                .skip_keywords
                .iter()
                .filter(|k| !k.is_empty())
                .map(|k| k.to_lowercase())
                .collect(),
        })
    }

    /// Count resolved imports landing in each architecture.
    pub fn zone_deps(&self, imports: &[ImportEdge]) -> ZoneDeps {
        imports
            .iter()
            .filter_map(|edge| edge.resolved.as_deref())
            .fold(ZoneDeps::default(), |mut deps, target| {
                if self.echo.owns_target(target) {
                    deps.echo += 1;
                }
                if self.qlib.owns_target(target) {
                    deps.qlib += 1;
                }
                deps
            })
    }

    /// Classify a file from its path, resolved imports and text.
    pub fn classify(&self, path: &str, imports: &[ImportEdge], text: &str) -> Classification {
        let deps = self.zone_deps(imports);
        for rule in RULES {
            if let Some(category) = self.evaluate(rule.predicate, path, &deps, text) {
                return match rule.zone {
                    Some(zone) => Classification::zoned(zone, category),
                    None => Classification::Skipped { keyword: category },
                };
            }
        }
        Classification::zoned(Zone::Unclassified, UNMATCHED)
    }

    /// Returns the category the predicate assigns, if it holds.
    fn evaluate(
        &self,
        predicate: Predicate,
        path: &str,
        deps: &ZoneDeps,
        text: &str,
    ) -> Option<String> {
        match predicate {
            Predicate::SpansBothZones => deps
                .spans_both()
                .then(|| BridgeKind::Bridge.as_str().to_string()),
            Predicate::SharedMemory { active } => {
                if !self.in_shared_memory(path) || self.is_active(text) != active {
                    return None;
                }
                Some(if active {
                    BridgeKind::MemoryCore.as_str().to_string()
                } else {
                    "old_memory".to_string()
                })
            }
            Predicate::ZonePath(side) => self.side(side).path_category(path).map(str::to_string),
            Predicate::InterfaceMention(side) => self
                .side(side)
                .is_mentioned_in(text)
                .then(|| "consumers".to_string()),
            Predicate::NameToken(side) => self
                .side(side)
                .is_named_in(path)
                .then(|| "consumers".to_string()),
            Predicate::LegacyPath => self.legacy.best_match(path).map(str::to_string),
            Predicate::SkipKeyword => {
                let lower = path.to_lowercase();
                self.skip_keywords
                    .iter()
                    .find(|k| lower.contains(k.as_str()))
                    .cloned()
            }
        }
    }

    fn side(&self, side: Side) -> &ZoneMatcher {
        match side {
            Side::Echo => &self.echo,
            Side::Qlib => &self.qlib,
        }
    }

    fn in_shared_memory(&self, path: &str) -> bool {
        self.shared_memory_dirs
            .iter()
            .any(|dir| !dir.is_empty() && path.contains(dir.as_str()))
    }

    fn is_active(&self, text: &str) -> bool {
        self.active_markers
            .iter()
            .any(|m| !m.is_empty() && text.contains(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ImportKind;

    fn classifier() -> Classifier {
        Classifier::from_config(&ScanConfig::default()).unwrap()
    }

    fn edge(target: &str) -> ImportEdge {
        ImportEdge {
            kind: ImportKind::Require,
            specifier: format!("./{}", target),
            resolved: Some(target.to_string()),
        }
    }

    fn zone_of(path: &str, imports: &[ImportEdge], text: &str) -> Option<Zone> {
        classifier().classify(path, imports, text).zone()
    }

    #[test]
    fn test_rule_table_order() {
        assert_eq!(RULES.len(), 9);
        assert_eq!(RULES[0].predicate, Predicate::SpansBothZones);
        assert_eq!(RULES[0].zone, Some(Zone::Bridge));
        assert_eq!(RULES[1].predicate, Predicate::ZonePath(Side::Echo));
        assert_eq!(RULES[5].predicate, Predicate::SharedMemory { active: true });
        assert_eq!(RULES[7].predicate, Predicate::LegacyPath);
        assert_eq!(RULES[8].zone, None);
    }

    #[test]
    fn test_bridge_beats_own_path() {
        let imports = [edge("src/echo/memory/MemoryService.js"), edge("backend/qlib/index.js")];
        let result = classifier().classify("src/echo/core/glue.js", &imports, "");

        assert_eq!(result.zone(), Some(Zone::Bridge));
        assert_eq!(result.bridge_kind(), Some(BridgeKind::Bridge));
    }

    #[test]
    fn test_one_sided_imports_are_not_a_bridge() {
        let imports = [edge("src/echo/core/aiManager.js")];
        assert_eq!(zone_of("src/app/view.js", &imports, ""), Some(Zone::Unclassified));
    }

    #[test]
    fn test_unresolved_imports_do_not_make_a_bridge() {
        let imports = [
            edge("src/echo/core/aiManager.js"),
            ImportEdge {
                kind: ImportKind::Es6,
                specifier: "../qlib/missing".to_string(),
                resolved: None,
            },
        ];
        assert_eq!(zone_of("src/app/view.js", &imports, ""), Some(Zone::Unclassified));
    }

    #[test]
    fn test_memory_core_and_inactive_memory() {
        let active = classifier().classify(
            "src/memory/MemoryVaultManager.js",
            &[],
            "class MemoryVaultManager {}",
        );
        assert_eq!(active.zone(), Some(Zone::Bridge));
        assert_eq!(active.bridge_kind(), Some(BridgeKind::MemoryCore));

        let inactive = classifier().classify("src/memory/scratch.js", &[], "let a = 1;");
        assert_eq!(inactive.zone(), Some(Zone::Legacy));
        assert_eq!(inactive.category(), Some("old_memory"));
    }

    #[test]
    fn test_qlib_conventions_beat_shared_memory() {
        let c = classifier();
        let interface = c.classify(
            "src/memory/QLibInterface.js",
            &[],
            "class QLibInterface {}\nmodule.exports = QLibInterface;",
        );
        assert_eq!(interface.zone(), Some(Zone::Qlib));
        assert_eq!(interface.category(), Some("interface"));

        let named = c.classify("src/memory/qlibGod.js", &[], "let a = 1;");
        assert_eq!(named.zone(), Some(Zone::Qlib));
        assert_eq!(named.category(), Some("consumers"));

        let capsule = c.classify("src/memory/capsuleStore.js", &[], "module.exports = {};");
        assert_eq!(capsule.zone(), Some(Zone::Qlib));
        assert_eq!(capsule.category(), Some("capsules"));
    }

    #[test]
    fn test_echo_categories() {
        let c = classifier();
        assert_eq!(
            c.classify("src/echo/engines/CodeEngine.js", &[], "").category(),
            Some("engines")
        );
        assert_eq!(
            c.classify("src/echo/memory/ContextInjector.js", &[], "").category(),
            Some("memory")
        );
        assert_eq!(
            c.classify("src/echo/core/aiManager.js", &[], "").category(),
            Some("core")
        );
        assert_eq!(
            c.classify("src/echo/memoryBridge.js", &[], "").category(),
            Some("memory")
        );
        assert_eq!(
            c.classify("src/echo/echo-router.js", &[], "").category(),
            Some("other")
        );
    }

    #[test]
    fn test_qlib_by_path_content_and_name() {
        let c = classifier();
        let by_path = c.classify("backend/qlib/semanticMapper.js", &[], "");
        assert_eq!(by_path.zone(), Some(Zone::Qlib));
        assert_eq!(by_path.category(), Some("backend"));

        let by_content = c.classify("src/handlers/vault.js", &[], "new QLibInterface()");
        assert_eq!(by_content.zone(), Some(Zone::Qlib));
        assert_eq!(by_content.category(), Some("consumers"));

        let by_name = c.classify("src/installer/QLib-setup.js", &[], "");
        assert_eq!(by_name.zone(), Some(Zone::Qlib));
        assert_eq!(by_name.category(), Some("consumers"));
    }

    #[test]
    fn test_legacy_components() {
        let c = classifier();
        assert_eq!(
            c.classify("components/ChatPanel.jsx", &[], "").category(),
            Some("components")
        );
        assert_eq!(
            c.classify("components/utils/vaultIndexer.js", &[], "").category(),
            Some("old_memory")
        );
        assert_eq!(
            c.classify("components-backup/old.js", &[], "").category(),
            Some("backup")
        );
        // components/utils without memory words is not legacy.
        assert_eq!(
            zone_of("components/utils/hotkey-logic.js", &[], ""),
            Some(Zone::Unclassified)
        );
    }

    #[test]
    fn test_diagnostic_files_are_skipped() {
        let result = classifier().classify("tools/echo-diagnostic-suite.js", &[], "");
        assert!(result.is_skipped());
        assert_eq!(result.zone(), None);

        // A zone path still wins over the skip keyword.
        let in_zone = classifier().classify("src/echo/echo-diagnostic.js", &[], "");
        assert_eq!(in_zone.zone(), Some(Zone::Echo));
    }

    #[test]
    fn test_classification_is_total() {
        let c = classifier();
        for path in ["a.js", "x/y/z.css", "index.html", "README.jsx"] {
            let result = c.classify(path, &[], "");
            assert!(result.is_skipped() || result.zone().is_some());
        }
        assert_eq!(
            c.classify("orphan.js", &[], "").category(),
            Some(UNMATCHED)
        );
    }

    #[test]
    fn test_zone_deps_counts_every_edge() {
        let imports = [
            edge("src/echo/a.js"),
            edge("src/echo/a.js"),
            edge("backend/qlib/b.js"),
            edge("lib/c.js"),
        ];
        let deps = classifier().zone_deps(&imports);
        assert_eq!(deps, ZoneDeps { echo: 2, qlib: 1 });
        assert!(deps.spans_both());
    }
}
