//! Dependency Graph
//!
//! This module implements the index of dependency relationships between
//! named entities.
//!
//! # Overview
//!
//! The graph is a set of ordered pairs `(s, t)` where `t` depends on `s`:
//!
//! - The dependents of `s` are every `t` with `(s, t)` stored
//! - The dependees of `t` are every `s` with `(s, t)` stored
//!
//! Cycles and self-pairs are allowed. Ordering evaluation, rejecting cycles
//! and deciding what to recompute belong to the caller.
//!
//! # Design Decisions
//!
//! 1. Keys are plain values rather than nodes holding pointers to their
//!    neighbours, so the graph never forms an ownership cycle.
//!
//! 2. We maintain both forward (dependents) and reverse (dependees) maps
//!    over the same pair set to answer lookups in either direction in O(1).
//!
//! 3. Queries hand out borrowed iterators. The borrow checker keeps callers
//!    from mutating the index while one is alive.

mod index;
mod pair;

pub use index::{DependencyIndex, Keys};
pub use pair::DependencyPair;
