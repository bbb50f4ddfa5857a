//! Procedural terrain heightmaps: midpoint displacement, diamond-square and
//! FFT spectral synthesis over a shared, seeded parameter set.
//!
//! Every generation call owns its grid and randomness stream, so tiles can be
//! generated on separate threads and a fixed seed reproduces a grid exactly.
//! Neighboring tiles are stitched by passing their shared edges as
//! [`PresetEdges`].

mod boundary;
mod diamond_square;
mod error;
mod generator;
mod grid;
mod midpoint;
mod normalize;
mod params;
mod seed;
mod spectral;

pub mod biome;
pub mod debug_viz;
pub mod fft;

pub use biome::{BiomeId, BiomeProfile, BiomeRegistry, BiomeRegistryError, ParamRange};
pub use boundary::{initialize_boundary, neighbor_edges};
pub use diamond_square::diamond_square;
pub use error::{TerrainError, TerrainResult};
pub use generator::{
    Algorithm, NormalizedHeightmap, Normalization, ParseAlgorithmError, generate,
    generate_normalized, generate_with,
};
pub use grid::{ElevationGrid, VisitedMask};
pub use midpoint::midpoint_displacement;
pub use normalize::{HeightRange, denormalize, map_range, normalize, normalize_with_bounds};
pub use params::{EdgeSide, GenerationParams, MAX_EXPONENT, PresetEdges};
pub use seed::{RANDOM_SEED, RandomSource, UniformSource, derive_tile_seed};
pub use spectral::{SpectralParams, attenuate, synthesize, white_noise};
