//! Import graph and reachability.
//!
//! [`ImportGraph`] models resolved imports between project files; its
//! [`ReachabilitySet`] feeds the [`ReachabilityAnalyzer`], which decides
//! which files are truly dead.
//!
//! # Example
//!
//! ```rust
//! use zonescan::graph::ImportGraph;
//!
//! let mut graph = ImportGraph::new();
//! graph.add_file("main.js");
//! graph.add_file("lib/a.js");
//! graph.add_import("main.js", "lib/a.js");
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod import_graph;
mod reachability;

pub use import_graph::{FileNode, ImportGraph, ReachabilitySet};
pub use reachability::ReachabilityAnalyzer;
