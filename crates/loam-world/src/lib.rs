//! # Loam World
//!
//! Storage and lifecycle of a generated Loam world.
//!
//! This crate handles:
//! - The authoritative tile store and its place/break rules
//! - Chunk grouping and visibility culling
//! - The two-pass generation of a complete world
//! - A lock-guarded handle for sharing a world across threads

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod chunk;
pub mod generation;
pub mod shared;
pub mod tile;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::chunk::*;
    pub use crate::generation::*;
    pub use crate::shared::*;
    pub use crate::tile::*;
    pub use crate::world::*;
}

pub use prelude::*;
