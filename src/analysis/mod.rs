//! Per-file source analysis.
//!
//! This module extracts the textual evidence the scanner works from:
//!
//! - `require()` calls and `import ... from` declarations
//! - export mechanisms and named export identifiers
//! - memory-domain function names
//! - resolution of relative specifiers to project files
//!
//! # Example
//!
//! ```ignore
//! use zonescan::analysis::{extract_imports, PathResolver};
//!
//! let resolver = PathResolver::new("./project", vec![".js".into(), ".jsx".into()]);
//! for import in extract_imports(&source) {
//!     let target = resolver.resolve(&import.specifier, "src/app.js");
//!     println!("{} -> {:?}", import.specifier, target);
//! }
//! ```

pub mod exports;
pub mod imports;
pub mod resolver;

pub use exports::{extract_exports, extract_memory_functions, ExportSet};
pub use imports::{extract_imports, is_relative_specifier, ImportEdge, ImportKind, RawImport};
pub use resolver::{join_relative, to_project_path, PathResolver};
