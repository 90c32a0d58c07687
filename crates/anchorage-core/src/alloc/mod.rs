//! Allocation and collection types for Anchorage.
//!
//! This module provides:
//! - Re-exports of hash collections using AHash
//! - A generational [`SparseSet`](sparse_set::SparseSet) arena for stable handles

pub mod sparse_set;

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
