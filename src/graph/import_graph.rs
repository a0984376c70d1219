//! File-level import graph built on petgraph.
//!
//! Nodes are project files, edges point from the importing file to the
//! resolved import target. Only resolved edges enter the graph; external and
//! unresolvable specifiers stay behind as evidence on the source file.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// A file in the import graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// Project-relative path.
    pub path: String,
}

/// The set of resolved import targets across the project.
///
/// A path is reachable iff at least one resolved edge points at it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachabilitySet {
    targets: BTreeSet<String>,
}

impl ReachabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.targets.contains(path)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ReachabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A directed graph of resolved imports between project files.
///
/// # Example
///
/// ```rust
/// use zonescan::graph::ImportGraph;
///
/// let mut graph = ImportGraph::new();
/// graph.add_file("src/app.js");
/// graph.add_file("src/util.js");
/// graph.add_import("src/app.js", "src/util.js");
///
/// assert_eq!(graph.importers("src/util.js"), vec!["src/app.js"]);
/// assert!(graph.reachability_set().contains("src/util.js"));
/// assert!(!graph.reachability_set().contains("src/app.js"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    graph: DiGraph<FileNode, ()>,
    node_indices: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Adds a file. Returns the existing index if already present.
    pub fn add_file(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(FileNode {
            path: path.to_string(),
        });
        self.node_indices.insert(path.to_string(), idx);
        idx
    }

    /// Adds a resolved import edge. A target outside the scanned set (for
    /// example a file in an excluded directory) gets its own node.
    pub fn add_import(&mut self, from: &str, to: &str) {
        let from_idx = self.add_file(from);
        let to_idx = self.add_file(to);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Files importing `path`, sorted and deduplicated.
    pub fn importers(&self, path: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(path) else {
            return Vec::new();
        };

        let set: BTreeSet<&str> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|edge| self.graph[edge.source()].path.as_str())
            .collect();
        set.into_iter().collect()
    }

    /// Every path with at least one incoming edge.
    pub fn reachability_set(&self) -> ReachabilitySet {
        self.graph
            .edge_references()
            .map(|edge| self.graph[edge.target()].path.clone())
            .collect()
    }

    /// Import cycles, each as a sorted list of paths. Cycles are ordered by
    /// their first path so output is stable across runs.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut paths: Vec<String> =
                    scc.iter().map(|&idx| self.graph[idx].path.clone()).collect();
                paths.sort();
                paths
            })
            .collect();
        cycles.sort();
        cycles
    }
}
