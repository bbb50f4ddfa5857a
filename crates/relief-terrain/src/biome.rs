//! Biome parameter profiles and their registry.
//!
//! A biome here is only a bundle of parameter ranges; sampling one yields a
//! [`crate::GenerationParams`] for a single tile. Choosing which biome a tile
//! belongs to is left to the caller.

mod profile;
mod registry;

pub use profile::{BiomeProfile, ParamRange};
pub use registry::{BiomeId, BiomeRegistry, BiomeRegistryError};
