//! Scan orchestration: walk → per-file analysis → barrier → global passes.
//!
//! Per-file analysis (read, extract, resolve, classify) has no cross-file
//! dependency and runs on a bounded rayon pool. Each worker returns a
//! [`FileOutcome`]; outcomes are collected in walk order and merged once.
//! The import graph and the dead-file pass only start after every outcome
//! is in, since they need the complete set of resolved targets.

mod types;
pub mod walker;

pub use types::{DiscoveredFile, FileOutcome, SourceFile, UnreadableFile};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::analysis::{
    extract_exports, extract_imports, extract_memory_functions, ImportEdge, PathResolver,
};
use crate::classify::Classifier;
use crate::config::ScanConfig;
use crate::error::{ScanError, ScanResult};
use crate::graph::{ImportGraph, ReachabilityAnalyzer, ReachabilitySet};

/// Everything a scan learned about a tree.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub root: PathBuf,
    /// Successfully analysed files in walk order.
    pub files: Vec<SourceFile>,
    pub unreadable: Vec<UnreadableFile>,
    pub graph: ImportGraph,
    pub reachable: ReachabilitySet,
    /// Sorted paths of truly dead files.
    pub dead: Vec<String>,
}

impl ScanOutput {
    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn files_scanned(&self) -> usize {
        self.files.len() + self.unreadable.len()
    }
}

/// The dual-architecture scanner.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
    classifier: Classifier,
    reachability: ReachabilityAnalyzer,
}

impl Scanner {
    /// Build a scanner, compiling every configured pattern up front.
    pub fn new(config: ScanConfig) -> ScanResult<Self> {
        Ok(Self {
            classifier: Classifier::from_config(&config)?,
            reachability: ReachabilityAnalyzer::from_config(&config)?,
            config,
        })
    }

    /// Scan the tree rooted at `root`.
    ///
    /// Fails only if the root is missing or the worker pool cannot be built;
    /// per-file failures are recorded in [`ScanOutput::unreadable`].
    pub fn scan(&self, root: &Path) -> ScanResult<ScanOutput> {
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::RootNotDirectory(root.to_path_buf()));
        }

        info!(root = %root.display(), "scan started");

        // Phase 1: discovery
        let discovery_start = Instant::now();
        let discovered = walker::walk_directory(root, &self.config);
        info!(
            files = discovered.len(),
            elapsed_ms = discovery_start.elapsed().as_millis() as u64,
            "discovery complete"
        );

        // Phase 2: per-file analysis
        let analysis_start = Instant::now();
        let resolver = PathResolver::new(root, self.config.resolve_extensions.clone());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.effective_threads())
            .build()?;
        let outcomes: Vec<FileOutcome> = pool.install(|| {
            discovered
                .par_iter()
                .map(|file| self.analyze_file(&resolver, file))
                .collect()
        });

        let mut files = Vec::with_capacity(outcomes.len());
        let mut unreadable = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(file) => files.push(file),
                Err(failed) => unreadable.push(failed),
            }
        }
        info!(
            analysed = files.len(),
            unreadable = unreadable.len(),
            elapsed_ms = analysis_start.elapsed().as_millis() as u64,
            "analysis complete"
        );

        // Phase 3: global passes, after every file is in.
        let graph = build_graph(&files);
        let reachable = graph.reachability_set();
        let dead = self.reachability.find_dead(&files, &reachable);
        info!(
            edges = graph.edge_count(),
            reachable = reachable.len(),
            dead = dead.len(),
            "reachability complete"
        );

        Ok(ScanOutput {
            root: root.to_path_buf(),
            files,
            unreadable,
            graph,
            reachable,
            dead,
        })
    }

    /// Read and analyse one discovered file.
    pub fn analyze_file(&self, resolver: &PathResolver, file: &DiscoveredFile) -> FileOutcome {
        let bytes = match fs::read(&file.abs_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %file.path, error = %e, "unreadable file");
                return Err(UnreadableFile {
                    path: file.path.clone(),
                    error: e.to_string(),
                });
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let mut analysed = self.analyze_source(resolver, &file.path, &text);
        // Lossy decoding can change the length; report the size on disk.
        analysed.size = bytes.len() as u64;
        Ok(analysed)
    }

    /// Analyse source text as if it lived at project path `path`.
    pub fn analyze_source(&self, resolver: &PathResolver, path: &str, text: &str) -> SourceFile {
        let imports: Vec<ImportEdge> = extract_imports(text)
            .into_iter()
            .map(|raw| ImportEdge {
                resolved: resolver.resolve(&raw.specifier, path),
                kind: raw.kind,
                specifier: raw.specifier,
            })
            .collect();

        let classification = self.classifier.classify(path, &imports, text);
        let deps = self.classifier.zone_deps(&imports);
        debug!(path, ?classification, imports = imports.len(), "file analysed");

        SourceFile {
            path: path.to_string(),
            size: text.len() as u64,
            lines: text.matches('\n').count(),
            exports: extract_exports(text),
            functions: extract_memory_functions(
                text,
                &self.config.domain_keywords,
                &self.config.const_function_keywords,
            ),
            imports,
            classification,
            deps,
        }
    }
}

/// Merge every file's resolved imports into one graph.
fn build_graph(files: &[SourceFile]) -> ImportGraph {
    let edge_count = files.iter().map(|f| f.imports.len()).sum();
    let mut graph = ImportGraph::with_capacity(files.len(), edge_count);
    for file in files {
        graph.add_file(&file.path);
    }
    for file in files {
        for edge in &file.imports {
            if let Some(target) = &edge.resolved {
                graph.add_import(&file.path, target);
            }
        }
    }
    graph
}
