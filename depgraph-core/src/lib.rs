//! Depgraph Core
//!
//! This crate provides a bidirectional index of dependency relationships
//! between keys, for use by spreadsheet-style evaluators.
//! It implements:
//!
//! - A set of ordered `(dependee, dependent)` pairs without duplicates
//! - Lookups of dependents and dependees in both directions
//! - Bulk replacement of a key's dependents or dependees
//!
//! The index is pure in-memory state. It performs no cycle detection,
//! topological ordering, persistence or locking; those belong to the caller.
//!
//! # Architecture
//!
//! - `graph`: the dependency index and the pair value type
//!
//! # Example
//!
//! ```rust
//! use depgraph_core::DependencyIndex;
//!
//! let mut index = DependencyIndex::new();
//! index.add_dependency("A1".to_string(), "B1".to_string());
//! index.add_dependency("A1".to_string(), "C1".to_string());
//!
//! // B1 and C1 must be recomputed when A1 changes
//! let dependents: Vec<_> = index.dependents("A1").collect();
//! assert_eq!(dependents, ["B1", "C1"]);
//!
//! // C1 now reads from B1 instead of A1
//! index.replace_dependees("C1".to_string(), ["B1".to_string()]);
//! assert_eq!(index.dependee_count("C1"), 1);
//! assert_eq!(index.size(), 2);
//! ```

pub mod graph;

pub use graph::{DependencyIndex, DependencyPair, Keys};
