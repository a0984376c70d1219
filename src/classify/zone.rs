//! Zone labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The architectural zone a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// User-facing memory layer.
    Echo,
    /// Backend vault-interface layer.
    Qlib,
    /// Connects Echo and QLib.
    Bridge,
    /// Old architecture, a migration or removal candidate.
    Legacy,
    /// Matched no convention.
    Unclassified,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::Echo,
        Zone::Qlib,
        Zone::Bridge,
        Zone::Legacy,
        Zone::Unclassified,
    ];

    /// Human-readable heading used by the exporters.
    pub fn title(&self) -> &'static str {
        match self {
            Zone::Echo => "ECHO System (Frontend/User-Facing)",
            Zone::Qlib => "QLIB System (Backend/Vault-Facing)",
            Zone::Bridge => "Bridge Files (Connect ECHO <-> QLIB)",
            Zone::Legacy => "Legacy Files (Old Architecture)",
            Zone::Unclassified => "Unclassified Files",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Echo => write!(f, "echo"),
            Zone::Qlib => write!(f, "qlib"),
            Zone::Bridge => write!(f, "bridge"),
            Zone::Legacy => write!(f, "legacy"),
            Zone::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Why a file is a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeKind {
    /// Imports from both Echo and QLib.
    Bridge,
    /// Lives in the shared memory directory and references the live system.
    MemoryCore,
}

impl BridgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeKind::Bridge => "bridge",
            BridgeKind::MemoryCore => "memory_core",
        }
    }

    /// Parses a bridge category name.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "bridge" => Some(BridgeKind::Bridge),
            "memory_core" => Some(BridgeKind::MemoryCore),
            _ => None,
        }
    }
}

impl fmt::Display for BridgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of classifying one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    /// Placed in a zone, under a category within it.
    Zoned { zone: Zone, category: String },
    /// Diagnostic, test, debug or audit file kept out of zone accounting.
    Skipped { keyword: String },
}

impl Classification {
    pub fn zoned(zone: Zone, category: impl Into<String>) -> Self {
        Classification::Zoned {
            zone,
            category: category.into(),
        }
    }

    pub fn zone(&self) -> Option<Zone> {
        match self {
            Classification::Zoned { zone, .. } => Some(*zone),
            Classification::Skipped { .. } => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Classification::Zoned { category, .. } => Some(category),
            Classification::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Classification::Skipped { .. })
    }

    pub fn bridge_kind(&self) -> Option<BridgeKind> {
        match self {
            Classification::Zoned {
                zone: Zone::Bridge,
                category,
            } => BridgeKind::from_category(category),
            _ => None,
        }
    }
}
