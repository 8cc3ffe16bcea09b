//! # Loam Worldgen
//!
//! Deterministic generation logic for the Loam tile world.
//!
//! This crate handles:
//! - Coherent noise fields and masks
//! - Biome classification through a noise gradient
//! - Column heights and the spawn point
//! - Material layering, ore veins, and cave hollowing
//! - Tree and ground cover decoration
//!
//! Nothing here stores tiles; placement goes through the [`TileSink`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod biome;
pub mod config;
pub mod fields;
pub mod height;
pub mod layers;
pub mod material;
pub mod noise;
pub mod ore;
pub mod vegetation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::biome::*;
    pub use crate::config::*;
    pub use crate::fields::*;
    pub use crate::height::*;
    pub use crate::layers::*;
    pub use crate::material::*;
    pub use crate::noise::*;
    pub use crate::ore::*;
    pub use crate::vegetation::*;
}

pub use prelude::*;
