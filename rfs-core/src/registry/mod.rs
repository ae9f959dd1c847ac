//! Node registry abstractions.
//!
//! This module provides the registry contract and a reference implementation:
//! - `NodeOps`, `DirectoryOps`, `FileOps`: per-kind capability interfaces
//! - `Registry`: everything a shell client needs, plus the root handle
//! - `MemoryRegistry`: in-process, ephemeral node tree
//! - `SeedTree`: JSON description used to populate a fresh tree

mod contract;
mod memory;
mod seed;

pub use contract::{DirectoryOps, FileOps, NodeOps, Registry};
pub use memory::MemoryRegistry;
pub use seed::{load_seed, load_seed_from_path, SeedNode, SeedTree};
